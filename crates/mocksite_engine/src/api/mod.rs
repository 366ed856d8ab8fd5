//! HTTP transport adapter: a single `HttpService` exposing the layout
//! service, compatible with both `RealPal` (production) and `MockPal`
//! (testing).

mod playground;
mod service;

pub use service::LayoutApiService;
