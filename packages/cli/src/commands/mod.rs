pub mod apply;
pub mod check;
pub mod init;
pub mod new;
pub mod remote;

pub use apply::{apply, ApplyArgs};
pub use check::{check, CheckArgs};
pub use init::{init, InitArgs};
pub use new::{new, NewArgs};
pub use remote::{publish, revert, save_version, versions, RemoteArgs, RevertArgs};
