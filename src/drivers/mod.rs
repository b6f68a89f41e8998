//! Port Access Layer: shift-register drivers and the pin-owning façade.

pub mod port_access;
pub mod shift_register;

#[cfg(test)]
pub(crate) mod sim;
