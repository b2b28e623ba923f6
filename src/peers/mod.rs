pub mod registry;

pub use registry::PeerSet;
