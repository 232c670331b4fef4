//! Live connection-string resolver for OGR data sources.

use crate::error::{Error, Result};
use crate::ports::resolver::ConnectionResolver;

/// PostgreSQL connection keys the OGR `PG` driver understands.
const PG_KEYS: &[&str] = &["dbname", "host", "port", "user", "password", "sslmode", "service"];

/// Resolves host-style layer references into OGR connection strings.
///
/// - `path|layername=roads` becomes `path`, since `-al` lists every layer.
/// - PostgreSQL key/value URIs become `PG:` strings, dropping keys that
///   only describe a single table (`table`, `key`, `srid`, `(geom)`, ...).
/// - Key/value URIs whose `dbname` is a file path (SpatiaLite style) become
///   that path. A PostgreSQL database name containing `/` or `\` would be
///   mistaken for a file.
/// - Everything else, including strings with a driver prefix, is passed
///   through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct OgrConnectionResolver;

impl ConnectionResolver for OgrConnectionResolver {
    fn connection_string(&self, layer: &str) -> Result<String> {
        let layer = layer.trim();
        if layer.is_empty() {
            return Err(Error::InvalidLayerReference(layer.to_string()));
        }

        let resolved = if has_driver_prefix(layer) {
            layer.to_string()
        } else if layer.contains("dbname=") {
            key_value_connection(layer)
        } else {
            strip_layer_selector(layer).to_string()
        };

        if resolved.is_empty() {
            return Err(Error::InvalidLayerReference(layer.to_string()));
        }
        Ok(resolved)
    }
}

/// Returns `true` for `PG:...`, `MySQL:...` and friends. Single letters are
/// Windows drive letters, not driver names.
fn has_driver_prefix(layer: &str) -> bool {
    match layer.split_once(':') {
        Some((prefix, _)) => {
            prefix.len() > 1
                && prefix.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

fn strip_layer_selector(layer: &str) -> &str {
    layer.split_once('|').map_or(layer, |(path, _)| path).trim()
}

fn key_value_connection(uri: &str) -> String {
    let pairs = key_value_pairs(uri);
    if let Some(path) = file_database(&pairs) {
        return path;
    }

    let pairs: Vec<String> = pairs
        .into_iter()
        .filter(|(key, _)| PG_KEYS.contains(&key.as_str()))
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    if pairs.is_empty() {
        return String::new();
    }
    format!("PG:{}", pairs.join(" "))
}

fn file_database(pairs: &[(String, String)]) -> Option<String> {
    let (_, value) = pairs.iter().find(|(key, _)| key == "dbname")?;
    let path = unquote(value);
    path.contains(['/', '\\']).then(|| path.to_string())
}

fn unquote(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value
}

/// Splits a libpq-style `key=value key='quoted value'` string. Values keep
/// their original quoting. Bare tokens such as `(geom)` are skipped.
fn key_value_pairs(uri: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut chars = uri.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| *c != '=' && !c.is_whitespace()) {
            key.push(c);
        }
        if chars.next_if_eq(&'=').is_none() {
            continue;
        }

        let mut value = String::new();
        if let Some(quote) = chars.next_if(|c| *c == '\'' || *c == '"') {
            value.push(quote);
            let mut escaped = false;
            for c in chars.by_ref() {
                value.push(c);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == quote {
                    break;
                }
            }
            // Composite values like "public"."roads" continue after the quote.
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                value.push(c);
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                value.push(c);
            }
        }
        pairs.push((key, value));
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(layer: &str) -> Result<String> {
        OgrConnectionResolver.connection_string(layer)
    }

    #[test]
    fn plain_path_passes_through() {
        assert_eq!(resolve("/data/roads.shp").unwrap(), "/data/roads.shp");
        assert_eq!(resolve("  /data/roads.gpkg \n").unwrap(), "/data/roads.gpkg");
    }

    #[test]
    fn windows_drive_letter_is_not_a_driver() {
        assert_eq!(
            resolve(r"C:\data\roads.gpkg|layername=roads").unwrap(),
            r"C:\data\roads.gpkg"
        );
    }

    #[test]
    fn layer_selector_is_stripped() {
        assert_eq!(resolve("/data/city.gpkg|layername=roads").unwrap(), "/data/city.gpkg");
        assert_eq!(resolve("/data/city.gpkg|layerid=0").unwrap(), "/data/city.gpkg");
    }

    #[test]
    fn driver_prefixed_strings_pass_through() {
        let conn = "PG:dbname=gis host=localhost";
        assert_eq!(resolve(conn).unwrap(), conn);
        assert_eq!(resolve("/vsizip/data.zip/roads.shp").unwrap(), "/vsizip/data.zip/roads.shp");
    }

    #[test]
    fn postgres_uri_becomes_pg_connection() {
        let uri = "dbname='my gis' host=localhost port=5432 user='me' sslmode=disable \
                   key='gid' srid=4326 type=LineString table=\"public\".\"roads\" (geom)";
        assert_eq!(
            resolve(uri).unwrap(),
            "PG:dbname='my gis' host=localhost port=5432 user='me' sslmode=disable"
        );
    }

    #[test]
    fn spatialite_uri_becomes_database_path() {
        let uri = r#"dbname='/data/x.sqlite' table="roads" (geometry)"#;
        assert_eq!(resolve(uri).unwrap(), "/data/x.sqlite");
        assert_eq!(
            resolve(r"dbname='C:\gis\city.sqlite' table=roads").unwrap(),
            r"C:\gis\city.sqlite"
        );
    }

    #[test]
    fn quoted_values_keep_escaped_quotes() {
        let pairs = key_value_pairs(r"dbname='it\'s' host=db");
        assert_eq!(
            pairs,
            vec![
                ("dbname".to_string(), r"'it\'s'".to_string()),
                ("host".to_string(), "db".to_string()),
            ]
        );
    }

    #[test]
    fn empty_reference_is_rejected() {
        assert!(matches!(resolve(""), Err(Error::InvalidLayerReference(_))));
        assert!(matches!(resolve("   "), Err(Error::InvalidLayerReference(_))));
        assert!(matches!(resolve("|layername=roads"), Err(Error::InvalidLayerReference(_))));
    }

    #[test]
    fn resolution_is_deterministic() {
        let uri = "dbname=gis host=localhost table=roads";
        assert_eq!(resolve(uri).unwrap(), resolve(uri).unwrap());
    }
}
