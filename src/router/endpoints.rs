use crate::{RouterError, RouterResult};
use url::Url;

/// Pages of the router's web interface used by the exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Logout,
    Reboot,
    WanStatus,
    ClientList,
    Statistics,
}

impl Page {
    /// Path and query of the page, relative to the session root
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/userRpm/LoginRpm.htm?Save=Save",
            Self::Logout => "/userRpm/LogoutRpm.htm",
            Self::Reboot => "/userRpm/SysRebootRpm.htm?Reboot=Reboot",
            Self::WanStatus => "/userRpm/StatusRpm.htm",
            Self::ClientList => "/userRpm/AssignedIpAddrListRpm.htm",
            Self::Statistics => "/userRpm/SystemStatisticRpm.htm?interval=10&Num_per_page=100",
        }
    }

    /// Every page except the login page lives under `/<token>`
    pub fn requires_token(&self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Builds the absolute URL of this page
    pub fn url(&self, base: &Url, token: Option<&str>) -> RouterResult<Url> {
        let path = match (self.requires_token(), token) {
            (false, _) => self.path().to_string(),
            (true, Some(token)) => format!("/{}{}", token, self.path()),
            (true, None) => return Err(RouterError::NotLoggedIn),
        };
        base.join(&path)
            .map_err(|e| RouterError::Address(format!("{}{}: {}", base, path, e)))
    }
}

/// Parses the configured router address into the root URL of its web interface
///
/// Bare hosts (`192.168.0.1`, `router.lan:8080`) are reached over plain HTTP.
/// Page paths hang off the host root, so an address with a path or query is
/// rejected.
pub fn base_url(address: &str) -> RouterResult<Url> {
    let trimmed = address.trim().trim_end_matches('/');
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| RouterError::Address(format!("{}: {}", address, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(RouterError::Address(format!(
            "{}: unsupported scheme {}",
            address,
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(RouterError::Address(format!("{}: missing host", address)));
    }
    if url.path() != "/" || url.query().is_some() {
        return Err(RouterError::Address(format!(
            "{}: expected a host without a path",
            address
        )));
    }

    Ok(url)
}
