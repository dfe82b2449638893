mod login;
pub use login::Login;

mod tasks;
pub use tasks::Tasks;
