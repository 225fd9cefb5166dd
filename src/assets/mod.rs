pub mod container;
pub mod io;

pub use container::AssetContainer;
#[cfg(feature = "http")]
pub use io::HttpAssetReader;
pub use io::{AssetReader, FileAssetReader};
