use super::client::AmapClient;
use super::models::IpLocation;
use crate::error::Result;

impl AmapClient {
    /// IP 定位，仅支持国内 IPv4
    pub fn locate_ip(&self, ip: &str) -> Result<IpLocation> {
        self.request("/ip", &[("ip", ip.to_string())])
    }
}
