// Purpose: event-loop plumbing shared by the piano and the app

pub mod scheduler;

pub use scheduler::Scheduler;
