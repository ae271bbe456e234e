mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod posts;
pub use posts::Posts;

mod subjects;
pub use subjects::Subjects;

mod profile;
pub use profile::Profile;
