use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Med-IA";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    "med_ia=info,tower_http=info".to_string()
}

/// Path to the raw CID-10 catalogue file.
/// `CID10_PATH` overrides the default location next to the binary.
pub fn catalog_path() -> PathBuf {
    std::env::var("CID10_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("cid10_datasus.json"))
}

/// Listen address for the API server. `PORT` overrides the default 5000.
pub fn bind_addr() -> SocketAddr {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    SocketAddr::from(([0, 0, 0, 0], port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_covers_crate() {
        assert!(default_log_filter().contains("med_ia"));
    }

    #[test]
    fn catalog_path_defaults_to_datasus_file() {
        if std::env::var("CID10_PATH").is_err() {
            assert!(catalog_path().ends_with("cid10_datasus.json"));
        }
    }

    #[test]
    fn bind_addr_is_wildcard() {
        assert!(bind_addr().ip().is_unspecified());
    }
}
