//! Domain layer: value types describing carts, forms and payment providers,
//! plus the async ports the requirement engine depends on.

pub mod cart;
pub mod form;
pub mod money;
pub mod ports;
pub mod provider;
pub mod requirement;
pub mod state;
