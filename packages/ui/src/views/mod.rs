mod login_form;
pub use login_form::LoginForm;

mod register_form;
pub use register_form::RegisterForm;

mod subject_list;
pub use subject_list::{SubjectCards, SubjectList};

mod profile;
pub use profile::ProfileView;

/// Shared form styles.
pub(crate) const FORM_CSS: &str = r#"
.auth-container, .profile-container {
    display: flex;
    flex-direction: column;
    align-items: center;
    padding: 2rem;
    gap: 1rem;
}

.auth-form {
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
    width: 100%;
    max-width: 360px;
}

.auth-form input {
    padding: 0.5rem 0.75rem;
    border: 1px solid #d4d4d4;
    border-radius: 4px;
}

.auth-form button, .subject-btn, .logout-btn {
    padding: 0.5rem 1.25rem;
    border: none;
    border-radius: 4px;
    background-color: #7763c5;
    color: white;
    cursor: pointer;
}

.auth-form button:disabled {
    opacity: 0.5;
    cursor: not-allowed;
}

.auth-error {
    color: #d32f2f;
}
"#;
