mod navigation;
pub use navigation::*;

mod paging;
pub use paging::*;

mod router;
pub use router::*;
