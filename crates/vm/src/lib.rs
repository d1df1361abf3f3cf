pub mod example;
pub mod host_interface;
pub mod vm;

pub use example::ExampleVm;
pub use host_interface::HostInterface;
pub use vm::Vm;
