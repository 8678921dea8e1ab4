//! データグラム送信の実装
//!
//! - `udp`: サーバーの UDP ソケットを使った実装

pub mod udp;

pub use udp::UdpDatagramPusher;
