//! Extraction of session settings from SQL scripts.
//!
//! Only `SET` statements are recognized:
//!
//! ```text
//! SET [SESSION | LOCAL | GLOBAL] name { TO | = } value
//! ```
//!
//! MySQL additionally allows several comma-separated assignments in one
//! statement and `@@scope.name` variable syntax.

use std::collections::BTreeMap;

use crate::traits::Vendor;

/// Return the settings assigned by a SQL script.
///
/// ```
/// use enginator::{get_settings, traits::Vendor};
///
/// let settings = get_settings("SET search_path TO schema_name;", Vendor::PostgreSQL);
/// assert_eq!(settings.get("search_path").map(String::as_str), Some("schema_name"));
/// ```
pub fn get_settings(sql: &str, vendor: Vendor) -> BTreeMap<String, String> {
    let mut settings = BTreeMap::new();

    for statement in split_statements(sql) {
        let Some(rest) = strip_keyword(&statement, "set") else {
            continue;
        };

        let assignments = match vendor {
            Vendor::MySQL => split_top_level(rest, ','),
            _ => vec![rest.to_string()],
        };

        for assignment in assignments {
            if let Some((name, value)) = parse_assignment(&assignment) {
                settings.insert(name, value);
            }
        }
    }

    settings
}

/// Split a script into trimmed statements, dropping comments.
fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            current.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' | '`' => {
                quote = Some(c);
                current.push(c);
            }
            '-' if chars.peek() == Some(&'-') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        current.push(' ');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for skipped in chars.by_ref() {
                    if previous == '*' && skipped == '/' {
                        break;
                    }
                    previous = skipped;
                }
                current.push(' ');
            }
            ';' => {
                let statement = current.trim();
                if !statement.is_empty() {
                    statements.push(statement.to_string());
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }

    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
    statements
}

/// Split on `separator` outside quotes and parentheses.
fn split_top_level(s: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;

    for c in s.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                current.push(c);
            }
            None => match c {
                '\'' | '"' | '`' => {
                    quote = Some(c);
                    current.push(c);
                }
                '(' => {
                    depth += 1;
                    current.push(c);
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    current.push(c);
                }
                c if c == separator && depth == 0 => {
                    parts.push(current.trim().to_string());
                    current.clear();
                }
                _ => current.push(c),
            },
        }
    }

    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

/// Strip a leading keyword (case-insensitive) followed by whitespace.
fn strip_keyword<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    let s = s.trim_start();
    let head = s.get(..keyword.len())?;
    let tail = &s[keyword.len()..];
    if head.eq_ignore_ascii_case(keyword) && tail.starts_with(char::is_whitespace) {
        Some(tail.trim_start())
    } else {
        None
    }
}

fn parse_assignment(assignment: &str) -> Option<(String, String)> {
    let mut rest = assignment.trim();
    for scope in ["session", "local", "global"] {
        if let Some(stripped) = strip_keyword(rest, scope) {
            rest = stripped;
            break;
        }
    }

    let end = rest
        .find(|c: char| c.is_whitespace() || c == '=')
        .unwrap_or(rest.len());
    let (raw_name, remainder) = rest.split_at(end);
    let remainder = remainder.trim_start();

    let value = if let Some(value) = remainder.strip_prefix('=') {
        value
    } else {
        strip_keyword(remainder, "to")?
    };

    let name = normalize_name(raw_name);
    let value = value.trim();
    if name.is_empty() || value.is_empty() {
        return None;
    }
    Some((name, value.to_string()))
}

/// Lowercase a setting name, dropping MySQL `@@scope.` prefixes.
fn normalize_name(raw: &str) -> String {
    let name = raw.trim_start_matches('@');
    let name = ["session.", "global.", "local."]
        .iter()
        .find_map(|prefix| {
            name.get(..prefix.len())
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .map(|_| &name[prefix.len()..])
        })
        .unwrap_or(name);
    name.trim_matches('"').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_settings_postgres() {
        let sql = "
            SET search_path TO schema_name;
            SELECT 1;
        ";
        let settings = get_settings(sql, Vendor::PostgreSQL);
        assert_eq!(settings.len(), 1);
        assert_eq!(settings["search_path"], "schema_name");
    }

    #[test]
    fn test_get_settings_equals_and_scope() {
        let settings = get_settings(
            "set session search_path = \"public\"; SET LOCAL statement_timeout = 5000",
            Vendor::PostgreSQL,
        );
        assert_eq!(settings["search_path"], "\"public\"");
        assert_eq!(settings["statement_timeout"], "5000");
    }

    #[test]
    fn test_get_settings_keeps_value_lists_for_postgres() {
        let settings = get_settings("SET search_path TO private, public", Vendor::PostgreSQL);
        assert_eq!(settings["search_path"], "private, public");
    }

    #[test]
    fn test_get_settings_mysql_multiple_assignments() {
        let settings = get_settings(
            "SET @@session.sql_mode = 'ANSI', time_zone = '+00:00'",
            Vendor::MySQL,
        );
        assert_eq!(settings["sql_mode"], "'ANSI'");
        assert_eq!(settings["time_zone"], "'+00:00'");
    }

    #[test]
    fn test_get_settings_ignores_comments_and_strings() {
        let sql = "
            -- SET search_path TO hidden;
            /* SET search_path = other; */
            SELECT 'SET search_path TO nope; ' AS s;
        ";
        assert!(get_settings(sql, Vendor::PostgreSQL).is_empty());
    }

    #[test]
    fn test_get_settings_ignores_non_set_statements() {
        assert!(get_settings("SELECT * FROM sales;", Vendor::PostgreSQL).is_empty());
        assert!(get_settings("SETTINGS foo = 1", Vendor::PostgreSQL).is_empty());
        assert!(get_settings("SET TIME ZONE 'UTC'", Vendor::PostgreSQL).is_empty());
    }

    #[test]
    fn test_split_statements_handles_semicolons_in_quotes() {
        let statements = split_statements("SELECT ';'; SELECT 2;");
        assert_eq!(statements, vec!["SELECT ';'", "SELECT 2"]);
    }
}
