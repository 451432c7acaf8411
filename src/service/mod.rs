pub mod lookup;
pub mod micro_task_list;
pub mod micro_task_service;
pub mod task_service;
pub mod update_policy;

pub use micro_task_service::MicroTaskService;
pub use task_service::TaskService;
