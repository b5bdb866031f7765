//! 端末のネットワーク状態（経路の有無で判定する HardwareStatus 実装）
//!
//! UDP ソケットを connect するだけで、パケットは送らない。
//! OS がサーバーへの経路を持たない（ネットワーク未接続）と connect が失敗する。

use crate::ports::outbound::HardwareStatus;
use std::net::UdpSocket;
use url::Url;

pub struct RouteHardwareStatus {
    server_url: Url,
}

impl RouteHardwareStatus {
    pub fn new(server_url: &Url) -> Self {
        Self {
            server_url: server_url.clone(),
        }
    }
}

impl HardwareStatus for RouteHardwareStatus {
    /// ホストが解決できない、または経路が無ければ offline
    fn is_online(&self) -> bool {
        let addr = match self.server_url.socket_addrs(|| None) {
            Ok(addrs) => match addrs.into_iter().next() {
                Some(a) => a,
                None => return false,
            },
            Err(_) => return false,
        };
        let bind = if addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        UdpSocket::bind(bind)
            .and_then(|socket| socket.connect(addr))
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(url: &str) -> RouteHardwareStatus {
        RouteHardwareStatus::new(&Url::parse(url).unwrap())
    }

    #[test]
    fn test_loopback_is_online() {
        assert!(status("http://127.0.0.1:5000").is_online());
        assert!(status("HTTP://127.0.0.1:5000/journal").is_online());
    }

    #[test]
    fn test_default_port_comes_from_scheme() {
        let url = Url::parse("https://127.0.0.1/").unwrap();
        assert_eq!(url.port_or_known_default(), Some(443));
        assert!(status("https://127.0.0.1/").is_online());
    }

    #[test]
    fn test_url_without_socket_address_is_offline() {
        assert!(!status("file:///tmp/journal").is_online());
    }
}
