//! # Task table — CRUD against the remote `tasks` table
//!
//! Every operation is a single request-response round trip. Selects are
//! filtered server-side to the session's user (`user_id=eq.<uid>`) and
//! ordered by id ascending, so the returned rows are the authoritative list
//! state. Inserts ask for the inserted row back (`Prefer:
//! return=representation`) so the caller can append exactly what the server
//! assigned; updates and deletes answer with no body.

use serde::Serialize;
use state::{NewTask, Session, Task};
use tracing::debug;

use crate::error::{check, Error};
use crate::Client;

#[derive(Serialize)]
struct TaskPatch<'a> {
    title: &'a str,
    description: &'a str,
}

fn select_url(base: &str, user_id: &str) -> String {
    format!("{base}/rest/v1/tasks?select=*&user_id=eq.{user_id}&order=id.asc")
}

fn row_url(base: &str, id: i64) -> String {
    format!("{base}/rest/v1/tasks?id=eq.{id}")
}

impl Client {
    /// All tasks owned by the session's user, ordered by creation id.
    pub async fn fetch_tasks(&self, session: &Session) -> Result<Vec<Task>, Error> {
        let response = self
            .http
            .get(select_url(&self.config().url, &session.user.id))
            .header("apikey", &self.config().anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        let body = check(response).await?.text().await?;
        let tasks: Vec<Task> = serde_json::from_str(&body)?;
        debug!("fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    /// Insert one row and return it with its server-assigned id.
    pub async fn insert_task(&self, session: &Session, task: &NewTask) -> Result<Task, Error> {
        let response = self
            .http
            .post(self.endpoint("/rest/v1/tasks"))
            .header("apikey", &self.config().anon_key)
            .bearer_auth(&session.access_token)
            .header("Prefer", "return=representation")
            .json(task)
            .send()
            .await?;
        let body = check(response).await?.text().await?;
        let mut rows: Vec<Task> = serde_json::from_str(&body)?;
        rows.pop().ok_or(Error::Api {
            status: 200,
            message: "insert returned no row".to_string(),
        })
    }

    /// Rewrite title and description of one row.
    pub async fn update_task(
        &self,
        session: &Session,
        id: i64,
        title: &str,
        description: &str,
    ) -> Result<(), Error> {
        let response = self
            .http
            .patch(row_url(&self.config().url, id))
            .header("apikey", &self.config().anon_key)
            .bearer_auth(&session.access_token)
            .json(&TaskPatch { title, description })
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// Remove one row.
    pub async fn delete_task(&self, session: &Session, id: i64) -> Result<(), Error> {
        let response = self
            .http
            .delete(row_url(&self.config().url, id))
            .header("apikey", &self.config().anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}
