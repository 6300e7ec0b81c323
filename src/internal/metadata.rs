//! 版本元数据：从一组来源下载 JSON 描述文件，以及点分版本号的规整与比较。

pub mod loader;
pub mod version;
pub mod version_metadata;

pub use loader::{MetadataError, MetadataLoader, SourceError, SourceFailure};
pub use version::{compare_versions, trim_version};
pub use version_metadata::{CoreInfo, InstallerInfo, ProgramInfo, VersionMetadata};
