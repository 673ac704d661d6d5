use std::net::IpAddr;
use std::path::{Path, PathBuf};

use url::Url;

use super::value::parse_bool;

/// Extension a VM bundle archive must carry.
pub const BUNDLE_EXTENSION: &str = "crcbundle";

/// A single acceptance check applied to raw input before a setting is stored.
///
/// Validators are evaluated in declaration order and the first rejection stops
/// the chain.
#[derive(Debug, Clone, Copy)]
pub enum Validator {
    Bool,
    /// Integer greater than or equal to the bound.
    MinInteger(i64),
    IpAddress,
    /// Absolute `http` or `https` URL with a host.
    Uri,
    /// Comma-separated host list without whitespace.
    NoProxy,
    ExistingPath,
    /// Existing file whose extension is [`BUNDLE_EXTENSION`].
    Bundle,
    OneOf(&'static [&'static str]),
    Custom(fn(&str) -> Result<(), String>),
}

impl Validator {
    /// Returns the rejection reason when `raw` is not acceptable.
    pub fn check(&self, raw: &str) -> Result<(), String> {
        match self {
            Validator::Bool => validate_bool(raw),
            Validator::MinInteger(min) => validate_min_integer(raw, *min),
            Validator::IpAddress => validate_ip_address(raw),
            Validator::Uri => validate_uri(raw),
            Validator::NoProxy => validate_no_proxy(raw),
            Validator::ExistingPath => validate_path(raw),
            Validator::Bundle => validate_bundle(raw),
            Validator::OneOf(allowed) => validate_one_of(raw, allowed),
            Validator::Custom(check) => check(raw),
        }
    }
}

fn validate_bool(raw: &str) -> Result<(), String> {
    parse_bool(raw.trim())
        .map(|_| ())
        .ok_or_else(|| "must be true or false".to_string())
}

fn parse_integer(raw: &str) -> Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| "requires integer value".to_string())
}

fn validate_min_integer(raw: &str, min: i64) -> Result<(), String> {
    let value = parse_integer(raw)?;
    if value < min {
        return Err(format!("requires integer value >= {min}"));
    }
    Ok(())
}

fn validate_ip_address(raw: &str) -> Result<(), String> {
    raw.trim()
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| "requires a valid IPv4 or IPv6 address".to_string())
}

fn validate_uri(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw.trim()).map_err(|err| format!("invalid URL: {err}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err("requires an http:// or https:// URL".to_string());
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err("URL is missing a host".to_string());
    }
    Ok(())
}

fn validate_no_proxy(raw: &str) -> Result<(), String> {
    if raw.chars().any(char::is_whitespace) {
        return Err("NoProxy string can't contain spaces".to_string());
    }
    if raw.split(',').any(str::is_empty) {
        return Err("NoProxy string contains an empty entry".to_string());
    }
    Ok(())
}

fn validate_path(raw: &str) -> Result<(), String> {
    let path = expand_home(raw.trim());
    if !path.exists() {
        return Err(format!("file '{}' does not exist", path.display()));
    }
    Ok(())
}

fn validate_bundle(raw: &str) -> Result<(), String> {
    let path = expand_home(raw.trim());
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == BUNDLE_EXTENSION);
    if !has_extension {
        return Err(format!(
            "bundle '{}' must have a .{BUNDLE_EXTENSION} extension",
            path.display()
        ));
    }
    if !path.is_file() {
        return Err(format!("bundle '{}' does not exist", path.display()));
    }
    Ok(())
}

fn validate_one_of(raw: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&raw.trim()) {
        return Ok(());
    }
    Err(format!("supported values: {}", allowed.join(", ")))
}

pub(crate) fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME").filter(|home| !home.is_empty()) {
            return Path::new(&home).join(rest);
        }
    }
    PathBuf::from(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn min_integer_rejects_small_and_non_numeric_values() {
        let validator = Validator::MinInteger(4);
        assert!(validator.check("4").is_ok());
        assert!(validator.check("12").is_ok());
        assert_eq!(
            validator.check("2").unwrap_err(),
            "requires integer value >= 4"
        );
        assert_eq!(validator.check("four").unwrap_err(), "requires integer value");
    }

    #[test]
    fn ip_address_accepts_v4_and_v6() {
        assert!(Validator::IpAddress.check("10.0.0.1").is_ok());
        assert!(Validator::IpAddress.check("::1").is_ok());
        assert!(Validator::IpAddress.check("10.0.0").is_err());
    }

    #[test]
    fn uri_requires_scheme_and_host() {
        assert!(Validator::Uri.check("http://proxy.example.com:3128").is_ok());
        assert!(Validator::Uri.check("https://user:pw@proxy.example.com").is_ok());
        assert!(Validator::Uri.check("proxy.example.com").is_err());
        assert!(Validator::Uri.check("http://").is_err());
        assert!(Validator::Uri.check("http://:8080").is_err());
        assert!(Validator::Uri.check("ftp://proxy.example.com").is_err());
    }

    #[test]
    fn uri_rejects_malformed_authority() {
        for raw in [
            "http://proxy:notaport",
            "http://[",
            "http://a^b",
            "http://proxy:99999999",
        ] {
            assert!(
                Validator::Uri.check(raw).unwrap_err().starts_with("invalid URL"),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn no_proxy_rejects_whitespace_and_empty_entries() {
        assert!(Validator::NoProxy.check("localhost,.example.com").is_ok());
        assert!(Validator::NoProxy.check("localhost, example.com").is_err());
        assert!(Validator::NoProxy.check("localhost,,example.com").is_err());
    }

    #[test]
    fn bundle_requires_existing_file_with_extension() {
        let temp = TempDir::new().expect("temp dir should exist");
        let bundle = temp.path().join("vm_4.14.crcbundle");
        let other = temp.path().join("vm_4.14.tar");
        fs::write(&bundle, "bundle").expect("write bundle");
        fs::write(&other, "tar").expect("write tar");

        assert!(Validator::Bundle.check(bundle.to_str().unwrap()).is_ok());
        assert!(
            Validator::Bundle
                .check(other.to_str().unwrap())
                .unwrap_err()
                .contains(".crcbundle")
        );
        let missing = temp.path().join("missing.crcbundle");
        assert!(
            Validator::Bundle
                .check(missing.to_str().unwrap())
                .unwrap_err()
                .contains("does not exist")
        );
    }

    #[test]
    fn existing_path_checks_filesystem() {
        let temp = TempDir::new().expect("temp dir should exist");
        assert!(
            Validator::ExistingPath
                .check(temp.path().to_str().unwrap())
                .is_ok()
        );
        assert!(
            Validator::ExistingPath
                .check(temp.path().join("nope").to_str().unwrap())
                .is_err()
        );
    }

    #[test]
    fn one_of_and_custom() {
        let validator = Validator::OneOf(&["yes", "no"]);
        assert!(validator.check("yes").is_ok());
        assert_eq!(validator.check("maybe").unwrap_err(), "supported values: yes, no");

        fn even(raw: &str) -> Result<(), String> {
            match raw.parse::<i64>() {
                Ok(value) if value % 2 == 0 => Ok(()),
                _ => Err("must be even".to_string()),
            }
        }
        assert!(Validator::Custom(even).check("2").is_ok());
        assert_eq!(Validator::Custom(even).check("3").unwrap_err(), "must be even");
    }
}
