pub mod srs;
