use crate::domain::model::{Session, Signup};
use crate::domain::ports::{RecordsGateway, SessionStore};
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;

/// Role lookup by directory scan. Until real auth exists the backend has no
/// login endpoint, so the client fetches both user directories, matches the
/// email, and trusts the result. Teachers win over students when an email
/// appears in both; an unmatched email is treated as an administrator.
pub async fn login<G, S>(gateway: &G, store: &S, email: &str) -> Result<Session>
where
    G: RecordsGateway,
    S: SessionStore,
{
    let needle = email.trim().to_lowercase();
    tracing::debug!("Looking up '{}' in the user directories", needle);

    let (teachers, students) =
        tokio::try_join!(gateway.list_teachers(), gateway.list_students())?;

    let session = if let Some(t) = teachers
        .iter()
        .find(|t| t.email.to_lowercase() == needle)
    {
        tracing::info!("Matched teacher #{}", t.id);
        Session::teacher(t.id)
    } else if let Some(s) = students
        .iter()
        .find(|s| s.email.to_lowercase() == needle)
    {
        tracing::info!("Matched student #{}", s.id);
        Session::student(s.id)
    } else {
        tracing::info!("No directory match, assuming ADMIN");
        Session::admin()
    };

    store.save(&session)?;
    Ok(session)
}

/// POST the signup form. Name, email and password must be non-blank before
/// anything goes over the wire.
pub async fn sign_up<G: RecordsGateway>(gateway: &G, req: &Signup) -> Result<()> {
    validate_non_empty_string("name", &req.name)?;
    validate_non_empty_string("email", &req.email)?;
    validate_non_empty_string("password", &req.password)?;
    gateway.sign_up(req).await
}
