// コアレイヤー - 基盤となるトレイト、型、エラー定義
// 他のレイヤーから参照される基本的な抽象化を提供

pub mod error;
pub mod extension;
pub mod traits;
pub mod types;

// 公開API
pub use error::{ErrorSeverity, RouterError, RouterResult};
pub use traits::{RouteReporter, RoutingConfig, SourceStream, TaskStream, TaskTransform};
pub use types::{RouteDecision, RouteReport, RouteSummary, SourceFile};
