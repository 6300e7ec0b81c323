use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 元数据文件的顶层结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMetadata {
    pub program: ProgramInfo,
    pub core: CoreInfo,
    pub installer: InstallerInfo,
}

/// 程序本体信息。下载链接等按平台名索引。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInfo {
    pub display_name: String,
    pub version: String,
    pub author: String,
    #[serde(default)]
    pub download: HashMap<String, String>,
    #[serde(default)]
    pub launch_file: HashMap<String, String>,
    pub install_path: String,
    #[serde(default)]
    pub file_associations: Vec<String>,
    /// 许可协议，每个元素一行
    #[serde(default, rename = "eula")]
    pub eula_lines: Vec<String>,
}

impl ProgramInfo {
    /// 许可协议全文（各行以 `\n` 连接）
    pub fn eula(&self) -> String {
        self.eula_lines.join("\n")
    }
}

/// 核心库信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreInfo {
    pub install_path: String,
    #[serde(default)]
    pub download: HashMap<String, String>,
    /// 平台名 → 必需文件列表
    #[serde(default)]
    pub required_files: HashMap<String, Vec<String>>,
}

/// 安装器信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerInfo {
    pub install_path: String,
    #[serde(default)]
    pub install_filename: HashMap<String, String>,
    pub version: String,
    #[serde(default)]
    pub download: HashMap<String, String>,
}
