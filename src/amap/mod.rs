//! 高德 Web 服务 API

pub mod client;
pub mod geocoding;
pub mod ip;
pub mod models;
pub mod poi;
pub mod route;
pub mod weather;

pub use client::{AmapClient, ClientConfig};
pub use poi::PoiQuery;
pub use route::{RouteOptions, RouteResult, TransportMode};
pub use weather::{WeatherKind, WeatherReport};
