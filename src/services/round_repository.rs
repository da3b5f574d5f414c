use sea_orm::sea_query::{Expr, OnConflict, Query, SimpleExpr, SubQueryStatement};
use sea_orm::{
    ActiveEnum, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use std::sync::Arc;
use tracing::Span;

use crate::dto::{JoinOutcome, Player, Round};
use crate::entities::{RoundStatus, round, round_entry, round_size, user, user_username};
use crate::error::{RoundError, SecretKind};
use crate::utils::secret::{
    AUTH_TOKEN_BYTES, OsSecretSource, ROUND_TICKET_BYTES, SecretSource, WATCH_TOKEN_BYTES,
    generate_key, generate_token,
};

/// Round and membership queries.
///
/// Every operation comes in two forms: `*_in` logs failures under the span it is given, the
/// plain form uses the span the repository was built with. Failures are logged once here and
/// then returned to the caller.
#[derive(Debug, Clone)]
pub struct RoundRepository {
    db: DatabaseConnection,
    log: Span,
    secrets: Arc<dyn SecretSource>,
}

#[derive(Debug, FromQueryResult)]
struct ActiveRoundRow {
    id: i32,
    name: String,
    wallpaper: String,
    joined: i64,
    min: i32,
    max: i32,
    starttime: Option<sea_orm::prelude::DateTimeWithTimeZone>,
    status: i32,
}

impl ActiveRoundRow {
    fn into_round(self) -> Result<Round, DbErr> {
        Ok(Round {
            id: self.id,
            name: self.name,
            wallpaper: self.wallpaper,
            joined: self.joined,
            min: self.min,
            max: self.max,
            starttime: self.starttime,
            status: RoundStatus::try_from_value(&self.status)?,
        })
    }
}

impl RoundRepository {
    /// Build a repository that logs under `log` and draws secrets from OS entropy.
    pub fn new(db: DatabaseConnection, log: Span) -> Self {
        Self {
            db,
            log,
            secrets: Arc::new(OsSecretSource),
        }
    }

    /// Replace the source used for membership secrets.
    #[must_use]
    pub fn with_secret_source(mut self, secrets: Arc<dyn SecretSource>) -> Self {
        self.secrets = secrets;
        self
    }

    pub const fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    // ── Active rounds ────────────────────────────────────────────────────────

    /// All rounds that are not finished, by ascending id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_active_rounds(&self) -> Result<Vec<Round>, RoundError> {
        self.list_active_rounds_in(&self.log).await
    }

    /// Same as [`Self::list_active_rounds`], logging under `log`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_active_rounds_in(&self, log: &Span) -> Result<Vec<Round>, RoundError> {
        self.fetch_active_rounds().await.inspect_err(|err| {
            tracing::error!(parent: log, error = %err, "Failed to list active rounds");
        })
    }

    async fn fetch_active_rounds(&self) -> Result<Vec<Round>, RoundError> {
        let joined = Query::select()
            .expr(Expr::col((round_entry::Entity, round_entry::Column::Id)).count())
            .from(round_entry::Entity)
            .and_where(
                Expr::col((round_entry::Entity, round_entry::Column::RoundId))
                    .equals((round::Entity, round::Column::Id)),
            )
            .to_owned();

        let rows = round::Entity::find()
            .select_only()
            .columns([round::Column::Id, round::Column::Name, round::Column::Wallpaper])
            .expr_as(
                SimpleExpr::SubQuery(None, Box::new(SubQueryStatement::SelectStatement(joined))),
                "joined",
            )
            .column(round_size::Column::Min)
            .column(round_size::Column::Max)
            .column(round::Column::Starttime)
            .column_as(round::Column::Status, "status")
            .join(JoinType::InnerJoin, round::Relation::RoundSize.def())
            .filter(round::Column::Status.is_in(RoundStatus::ACTIVE.map(|s| s.to_value())))
            .order_by_asc(round::Column::Id)
            .into_model::<ActiveRoundRow>()
            .all(&self.db)
            .await?;

        let rounds = rows
            .into_iter()
            .map(ActiveRoundRow::into_round)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rounds)
    }

    // ── Members ──────────────────────────────────────────────────────────────

    /// Players who joined `round_id`, with their usernames.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_round_players(&self, round_id: i32) -> Result<Vec<Player>, RoundError> {
        self.list_round_players_in(round_id, &self.log).await
    }

    /// Same as [`Self::list_round_players`], logging under `log`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_round_players_in(
        &self,
        round_id: i32,
        log: &Span,
    ) -> Result<Vec<Player>, RoundError> {
        let rows = round_entry::Entity::find()
            .select_only()
            .column(round_entry::Column::UserId)
            .column(user_username::Column::Username)
            .join(JoinType::InnerJoin, round_entry::Relation::User.def())
            .join(JoinType::InnerJoin, user::Relation::Username.def())
            .filter(round_entry::Column::RoundId.eq(round_id))
            .order_by_asc(round_entry::Column::UserId)
            .into_tuple::<(i32, String)>()
            .all(&self.db)
            .await
            .map_err(RoundError::from)
            .inspect_err(|err| {
                tracing::error!(parent: log, round_id, error = %err, "Failed to list round players");
            })?;

        Ok(rows
            .into_iter()
            .map(|(user_id, username)| Player::new(user_id, username))
            .collect())
    }

    /// Ids of the users who joined `round_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_joined_user_ids(&self, round_id: i32) -> Result<Vec<i32>, RoundError> {
        self.list_joined_user_ids_in(round_id, &self.log).await
    }

    /// Same as [`Self::list_joined_user_ids`], logging under `log`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_joined_user_ids_in(
        &self,
        round_id: i32,
        log: &Span,
    ) -> Result<Vec<i32>, RoundError> {
        round_entry::Entity::find()
            .select_only()
            .column(round_entry::Column::UserId)
            .filter(round_entry::Column::RoundId.eq(round_id))
            .order_by_asc(round_entry::Column::UserId)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(RoundError::from)
            .inspect_err(|err| {
                tracing::error!(parent: log, round_id, error = %err, "Failed to list joined users");
            })
    }

    // ── Joining ──────────────────────────────────────────────────────────────

    /// Add `user_id` to `round_id`, issuing fresh membership secrets.
    ///
    /// Joining twice is not an error: the second call reports
    /// [`JoinOutcome::AlreadyJoined`] and leaves the existing membership untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if secret generation or the insert fails. Nothing is written in
    /// either case.
    pub async fn join_round(&self, user_id: i32, round_id: i32) -> Result<JoinOutcome, RoundError> {
        self.join_round_in(user_id, round_id, &self.log).await
    }

    /// Same as [`Self::join_round`], logging under `log`.
    ///
    /// # Errors
    ///
    /// Returns an error if secret generation or the insert fails.
    pub async fn join_round_in(
        &self,
        user_id: i32,
        round_id: i32,
        log: &Span,
    ) -> Result<JoinOutcome, RoundError> {
        let outcome = self
            .insert_entry(user_id, round_id)
            .await
            .inspect_err(|err| {
                tracing::error!(
                    parent: log,
                    user_id,
                    round_id,
                    error = %err,
                    "Failed to join round"
                );
            })?;

        tracing::debug!(parent: log, user_id, round_id, ?outcome, "Round join processed");
        Ok(outcome)
    }

    async fn insert_entry(&self, user_id: i32, round_id: i32) -> Result<JoinOutcome, RoundError> {
        let entry = match self.new_entry(user_id, round_id) {
            Ok(entry) => entry,
            // Existing members need no fresh secrets.
            Err(err) => {
                if self.is_member(user_id, round_id).await? {
                    return Ok(JoinOutcome::AlreadyJoined);
                }
                return Err(err);
            }
        };

        // The unique index on (user_id, round_id) turns a repeat join into a no-op insert.
        let inserted = round_entry::Entity::insert(entry)
            .on_conflict(
                OnConflict::columns([round_entry::Column::UserId, round_entry::Column::RoundId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(if inserted == 0 {
            JoinOutcome::AlreadyJoined
        } else {
            JoinOutcome::Joined
        })
    }

    async fn is_member(&self, user_id: i32, round_id: i32) -> Result<bool, RoundError> {
        let found = round_entry::Entity::find()
            .select_only()
            .column(round_entry::Column::Id)
            .filter(round_entry::Column::UserId.eq(user_id))
            .filter(round_entry::Column::RoundId.eq(round_id))
            .into_tuple::<i32>()
            .one(&self.db)
            .await?;

        Ok(found.is_some())
    }

    /// Membership row for a fresh join, with all four secrets drawn in order.
    fn new_entry(&self, user_id: i32, round_id: i32) -> Result<round_entry::ActiveModel, RoundError> {
        Ok(round_entry::ActiveModel {
            user_id: Set(user_id),
            round_id: Set(round_id),
            auth_token: Set(self.token(SecretKind::AuthToken, AUTH_TOKEN_BYTES)?),
            round_ticket: Set(self.token(SecretKind::RoundTicket, ROUND_TICKET_BYTES)?),
            watch_token: Set(self.token(SecretKind::WatchToken, WATCH_TOKEN_BYTES)?),
            aes_key: Set(generate_key(self.secrets.as_ref()).map_err(|source| {
                RoundError::Secret {
                    secret: SecretKind::AesKey,
                    source,
                }
            })?),
            ..Default::default()
        })
    }

    fn token(&self, secret: SecretKind, len: usize) -> Result<String, RoundError> {
        generate_token(self.secrets.as_ref(), len)
            .map_err(|source| RoundError::Secret { secret, source })
    }

    // ── Lookup ───────────────────────────────────────────────────────────────

    /// Whether a round with `round_id` exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn round_exists(&self, round_id: i32) -> Result<bool, RoundError> {
        self.round_exists_in(round_id, &self.log).await
    }

    /// Same as [`Self::round_exists`], logging under `log`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn round_exists_in(&self, round_id: i32, log: &Span) -> Result<bool, RoundError> {
        let found = round::Entity::find_by_id(round_id)
            .select_only()
            .column(round::Column::Id)
            .into_tuple::<i32>()
            .one(&self.db)
            .await
            .map_err(RoundError::from)
            .inspect_err(|err| {
                tracing::error!(parent: log, round_id, error = %err, "Failed to look up round");
            })?;

        Ok(found.is_some())
    }
}
