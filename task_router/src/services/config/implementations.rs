// 設定管理の具象実装

use crate::core::RoutingConfig;
use serde::Deserialize;

const DEFAULT_BUFFER_SIZE: usize = 100;

/// デフォルト設定実装
///
/// 設定ファイルの `routing` セクションからも読み込める。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultRoutingConfig {
    channel_buffer_size: usize,
    enable_progress_reporting: bool,
}

impl DefaultRoutingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.channel_buffer_size = buffer_size;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress_reporting = enable;
        self
    }
}

impl Default for DefaultRoutingConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: DEFAULT_BUFFER_SIZE,
            enable_progress_reporting: true,
        }
    }
}

impl RoutingConfig for DefaultRoutingConfig {
    fn channel_buffer_size(&self) -> usize {
        self.channel_buffer_size
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress_reporting
    }
}
