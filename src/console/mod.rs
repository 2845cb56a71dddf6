//! Console layer - Views, form handlers, polling widgets and page routing

pub mod forms;
pub mod fragment;
pub mod polling;
pub mod router;
pub mod scope;
pub mod view;

pub use forms::{FormHandler, SubmitOutcome};
pub use fragment::render_fragment;
pub use polling::{spawn_polling, PollingWidget};
pub use router::{FragmentContext, FragmentRouter, InitHook, Navigation, Page};
pub use scope::ViewScope;
pub use view::{ScopedView, TerminalView, Tone, ViewElement, ViewSink};
