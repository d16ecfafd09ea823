//! Session identity provider.

use crate::storage::HistoryStore;
use tracing::warn;
use uuid::Uuid;

/// Return the stable session identifier for this installation, creating
/// and persisting one on first use.
///
/// Storage failures degrade to a transient identifier valid only for the
/// current process; they are logged, never surfaced. No network I/O.
#[must_use]
pub fn get_or_create_session_id(store: &dyn HistoryStore) -> String {
    match store.load_session_id() {
        Ok(Some(session_id)) => return session_id,
        Ok(None) => {}
        Err(err) => {
            warn!("could not read stored session id: {err}");
        }
    }

    let session_id = Uuid::new_v4().to_string();
    if let Err(err) = store.save_session_id(&session_id) {
        warn!("could not persist session id, using transient id: {err}");
    }
    session_id
}
