use serde::Deserialize;
use tracing::debug;

use mocksite_base::{FilePath, MocksiteError, MocksiteResult, PalHandle, error::ErrorKind};

/// Configuration for a mocksite server.
///
/// Every field has a default so the server runs out of the box; a
/// `mocksite.toml` file overrides individual fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the route documents, relative to the working
    /// directory.
    pub routes_dir: String,
    /// Host address the server binds to.
    pub host: String,
    /// Port the server listens on.
    pub port: u16,
    /// Path of the layout query endpoint.
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routes_dir: "data/routes".to_string(),
            host: "127.0.0.1".to_string(),
            port: 4000,
            endpoint: "/sitecore/api/graph/edge".to_string(),
        }
    }
}

/// Load configuration from the given path, falling back to defaults when
/// the file does not exist. A file that exists but fails to parse is an
/// error.
pub fn load_config(pal: &PalHandle, path: &FilePath) -> MocksiteResult<Config> {
    if !pal.file_exists(path)? {
        debug!(path = %path, "no configuration file, using defaults");
        return Ok(Config::default());
    }

    let contents = pal.read_file_to_string(path)?;
    toml::from_str(&contents).map_err(|e| {
        Box::new(MocksiteError::new(ErrorKind::ParseError {
            path: path.as_path().to_path_buf(),
            message: e.to_string(),
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mocksite_base::MockPal;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.routes_dir, "data/routes");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 4000);
        assert_eq!(config.endpoint, "/sitecore/api/graph/edge");
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let pal = PalHandle::new(MockPal::new());
        let config = load_config(&pal, &FilePath::from("mocksite.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_full_file() {
        let mock = MockPal::new();
        mock.add_file(
            FilePath::from("mocksite.toml"),
            b"routes_dir = \"fixtures/routes\"\nhost = \"0.0.0.0\"\nport = 8080\nendpoint = \"/graphql\"\n".to_vec(),
        );
        let pal = PalHandle::new(mock);

        let config = load_config(&pal, &FilePath::from("mocksite.toml")).unwrap();
        assert_eq!(config.routes_dir, "fixtures/routes");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.endpoint, "/graphql");
    }

    #[test]
    fn test_load_config_partial_file_keeps_defaults() {
        let mock = MockPal::new();
        mock.add_file(FilePath::from("mocksite.toml"), b"port = 4040\n".to_vec());
        let pal = PalHandle::new(mock);

        let config = load_config(&pal, &FilePath::from("mocksite.toml")).unwrap();
        assert_eq!(config.port, 4040);
        assert_eq!(config.routes_dir, "data/routes");
        assert_eq!(config.endpoint, "/sitecore/api/graph/edge");
    }

    #[test]
    fn test_load_config_invalid_toml_is_parse_error() {
        let mock = MockPal::new();
        mock.add_file(FilePath::from("mocksite.toml"), b"port = \"forty\"\n".to_vec());
        let pal = PalHandle::new(mock);

        let error = load_config(&pal, &FilePath::from("mocksite.toml")).unwrap_err();
        match error.kind() {
            ErrorKind::ParseError { .. } => {}
            other => panic!("expected ParseError, got {:?}", other),
        }
    }
}
