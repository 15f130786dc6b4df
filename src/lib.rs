extern crate fnv;
extern crate ini;
extern crate png;

#[cfg(test)]
extern crate rand;

pub mod alg;
pub mod camera;
pub mod config;
pub mod graphics;
pub mod mesh;
pub mod render;
