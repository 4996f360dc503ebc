pub const DEFAULT_START_URL: &str = "https://educacionvirtual.javeriana.edu.co/nuestros-programas-nuevo";
pub const DEFAULT_TARGET_DOMAIN: &str = "educacionvirtual.javeriana.edu.co";

/// Title used when a node or page carries no usable heading.
pub const UNTITLED: &str = "Sin título";

/// Institutional suffix appended to page titles by the catalog's CMS.
pub const TITLE_SUFFIX: &str = " - Educación Continua de la Pontificia Universidad Javeriana - Portal Universitario";

/// Where the catalog lives and which host its course links must point to.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub start_url: String,
    pub target_domain: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self { start_url: DEFAULT_START_URL.to_string(), target_domain: DEFAULT_TARGET_DOMAIN.to_string() }
    }
}

impl CrawlConfig {
    /// True when `host` is the target domain or one of its subdomains.
    pub fn accepts_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        let domain = self.target_domain.to_ascii_lowercase();
        host == domain || host.ends_with(&format!(".{domain}"))
    }
}
