// src/common/db_utils.rs

use sqlx::PgConnection;

// ---
// Helpers para interpretar violações de constraint do Postgres
// ---

/// Nome da constraint UNIQUE violada, se for esse o erro.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    let db_err = err.as_database_error()?;
    if db_err.is_unique_violation() {
        Some(db_err.constraint().unwrap_or_default())
    } else {
        None
    }
}

/// Nome da FOREIGN KEY violada, se for esse o erro.
pub(crate) fn foreign_key_violation(err: &sqlx::Error) -> Option<&str> {
    let db_err = err.as_database_error()?;
    if db_err.is_foreign_key_violation() {
        Some(db_err.constraint().unwrap_or_default())
    } else {
        None
    }
}

/// Faz a transação enxergar um único snapshot do banco, para que contagem,
/// totais e página de um relatório batam entre si.
pub(crate) async fn read_snapshot(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(conn)
        .await?;
    Ok(())
}

/// Monta o padrão ILIKE de "contém", tratando `%`, `_` e `\` como literais.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Termo de busca opcional já como padrão ILIKE; vazio ou só espaços vira `None`.
pub(crate) fn search_pattern(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|term| !term.is_empty())
        .map(contains_pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_no_search() {
        assert_eq!(search_pattern(None), None);
        assert_eq!(search_pattern(Some("   ")), None);
        assert_eq!(search_pattern(Some(" nu ")), Some("%nu%".to_string()));
    }

    #[test]
    fn plain_terms_are_wrapped() {
        assert_eq!(contains_pattern("arroz"), "%arroz%");
    }

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn non_database_errors_are_not_violations() {
        let err = sqlx::Error::RowNotFound;
        assert!(unique_violation(&err).is_none());
        assert!(foreign_key_violation(&err).is_none());
    }
}
