//! Bootstrap parameters — the immutable record that drives a materialization
//! run, plus the name/endpoint derivations performed before the run starts.

use std::fmt;
use std::path::PathBuf;

/// Scheme prepended to a hostname that was given without one.
pub const DEFAULT_SCHEME: &str = "https";

/// Endpoint baked into the template; effective when no hostname is given.
pub const DEFAULT_HOSTNAME: &str = "https://public.dashboards.example.com";

// ============================================================================
// Backend variant
// ============================================================================

/// Selectable target platform for the generated application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// Hosted classic backend — the template ships wired for this one.
    #[default]
    Classic,
    /// Nova backend — activates the conditional rules and the variant files.
    Nova,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Nova => write!(f, "nova"),
        }
    }
}

// ============================================================================
// Bootstrap parameters
// ============================================================================

/// Immutable inputs for one materialization run.
///
/// Built once by the CLI layer, never mutated. The rule tree is a pure
/// function of this record: identical parameters against identical template
/// contents produce byte-identical output trees.
#[derive(Debug, Clone)]
pub struct BootstrapParams {
    /// Sanitized application identifier, substituted into metadata.
    pub app_name: String,
    /// Directory the project is materialized into.
    pub target_dir: PathBuf,
    /// Backend endpoint as given on the command line, scheme optional.
    pub hostname: Option<String>,
    /// Selected backend variant.
    pub backend: Backend,
    /// Emit diagnostic detail while running.
    pub verbose: bool,
    /// Run the dependency installer after materialization.
    pub install: bool,
}

impl BootstrapParams {
    /// Full backend endpoint: the given hostname with a scheme guaranteed,
    /// or the template default when no hostname was given.
    pub fn endpoint(&self) -> String {
        match self.hostname.as_deref() {
            None | Some("") => DEFAULT_HOSTNAME.to_string(),
            Some(host) => match scheme_of(host) {
                Some(_) => host.to_string(),
                None => format!("{}://{}", DEFAULT_SCHEME, host),
            },
        }
    }

    /// Scheme of the effective endpoint.
    pub fn scheme(&self) -> String {
        let endpoint = self.endpoint();
        scheme_of(&endpoint).unwrap_or(DEFAULT_SCHEME).to_string()
    }
}

// ============================================================================
// Derivations
// ============================================================================

/// Scheme portion of a hostname (`https` in `https://x`), if present.
///
/// A scheme is a nonempty run of word characters before `://`, so schemes
/// like `s3` count and keep their hostname untouched.
pub fn scheme_of(hostname: &str) -> Option<&str> {
    let (scheme, _) = hostname.split_once("://")?;
    if !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Some(scheme)
    } else {
        None
    }
}

/// Reduce a raw application name to a safe package identifier.
///
/// Lowercases, collapses every run of unsupported characters into a single
/// dash, and trims dashes from the ends. An input with nothing usable yields
/// `app` so downstream substitution always has an identifier to work with.
pub fn sanitize_app_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut gap = false;
    for c in raw.trim().chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            if gap && !out.is_empty() {
                out.push('-');
            }
            gap = false;
            out.push(c);
        } else {
            gap = true;
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "app".to_string()
    } else {
        trimmed.to_string()
    }
}
