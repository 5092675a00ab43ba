pub mod scl90r;
