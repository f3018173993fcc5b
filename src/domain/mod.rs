// Domain layer: remote site and template models, ports (interfaces) and the token parser.

pub mod model;
pub mod ports;
pub mod token;
