pub mod jackson;
pub mod oacc;
pub mod potential_map;
