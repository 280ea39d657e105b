// 連鎖解決のドメイン層

pub mod connectivity;
pub mod gravity;
pub mod resolver;
pub mod result;
pub mod score;
pub mod union_find;
pub mod vanish;

pub use connectivity::{Components, ConnectivityAnalyzer};
pub use gravity::GravityCollapser;
pub use resolver::{ChainResolver, ResolverPhase};
pub use result::{DropTimeline, Frame, VanishStep};
pub use score::VanishStats;
pub use union_find::UnionFind;
pub use vanish::{VanishEvaluator, VanishOutcome};
