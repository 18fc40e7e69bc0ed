//! Optimistic like and comment state machines.
//!
//! Both reducers update local state before the remote write and reconcile
//! afterwards: success keeps the optimistic value, failure rolls back (likes)
//! or restores the typed text (comments). A duplicate-like insert conflict is
//! success, not failure. There is no periodic re-sync; the optimistic value
//! is trusted until a write fails. Unauthenticated actors get the login
//! redirect and no optimistic mutation.

use crate::types::UserId;
use std::sync::Arc;
use uuid::Uuid;
use wayfare_core::{async_effect, Effect, Reducer, SmallVec};
use wayfare_platform::{CommentRow, NewComment, PlatformApi, SocialEntityKind};

// ============================================================================
// Like toggle
// ============================================================================

/// Like-widget state for one entity.
#[derive(Clone, Debug)]
pub struct LikeState {
    /// Which relation pair the entity lives in
    pub kind: SocialEntityKind,
    /// The liked entity
    pub entity_id: Uuid,
    /// Current count, optimistically maintained
    pub likes_count: u64,
    /// Whether the session user has liked it
    pub is_liked: bool,
    /// Pre-toggle snapshot held while a write is in flight
    rollback: Option<(bool, u64)>,
    /// Set when an unauthenticated actor toggles
    pub login_redirect: bool,
}

impl LikeState {
    /// Widget state as first rendered from a fetched summary.
    #[must_use]
    pub const fn new(
        kind: SocialEntityKind,
        entity_id: Uuid,
        likes_count: u64,
        is_liked: bool,
    ) -> Self {
        Self {
            kind,
            entity_id,
            likes_count,
            is_liked,
            rollback: None,
            login_redirect: false,
        }
    }
}

/// Every input to the like widget.
#[derive(Clone, Debug)]
pub enum LikeAction {
    /// Flip the like
    Toggle,
    /// Remote write landed (or was a duplicate-like no-op)
    WriteSucceeded,
    /// Remote write failed; roll back
    WriteFailed {
        /// Platform error text, for the log
        message: String,
    },
}

/// Dependencies of the social reducers.
#[derive(Clone)]
pub struct SocialEnvironment {
    /// Platform handle; `None` disables writes
    pub platform: Option<Arc<dyn PlatformApi>>,
    /// The signed-in user, if any
    pub session: Option<UserId>,
    /// Fired once per successfully posted comment
    pub on_comment_added: Arc<dyn Fn() + Send + Sync>,
}

impl SocialEnvironment {
    /// Creates a new `SocialEnvironment` with a no-op comment callback
    #[must_use]
    pub fn new(platform: Option<Arc<dyn PlatformApi>>, session: Option<UserId>) -> Self {
        Self {
            platform,
            session,
            on_comment_added: Arc::new(|| {}),
        }
    }

    /// Replace the comment-posted callback
    #[must_use]
    pub fn with_comment_callback(mut self, callback: Arc<dyn Fn() + Send + Sync>) -> Self {
        self.on_comment_added = callback;
        self
    }
}

/// Reducer for the like widget.
#[derive(Clone, Debug, Default)]
pub struct LikeReducer;

impl LikeReducer {
    /// Creates a new `LikeReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for LikeReducer {
    type State = LikeState;
    type Action = LikeAction;
    type Environment = SocialEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            LikeAction::Toggle => {
                let Some(user) = env.session else {
                    state.login_redirect = true;
                    return SmallVec::new();
                };
                let Some(platform) = env.platform.clone() else {
                    // Feature unavailable without the platform.
                    return SmallVec::new();
                };

                state.rollback = Some((state.is_liked, state.likes_count));
                let target = !state.is_liked;
                state.is_liked = target;
                if target {
                    state.likes_count += 1;
                } else {
                    state.likes_count = state.likes_count.saturating_sub(1);
                }

                let kind = state.kind;
                let entity_id = state.entity_id;
                let user_id = *user.as_uuid();
                let effect = if target {
                    async_effect! {
                        match platform.insert_like(kind, entity_id, user_id).await {
                            Ok(()) => Some(LikeAction::WriteSucceeded),
                            // Double-like is a no-op, not a failure.
                            Err(err) if err.is_unique_violation() => {
                                Some(LikeAction::WriteSucceeded)
                            }
                            Err(err) => Some(LikeAction::WriteFailed {
                                message: err.to_string(),
                            }),
                        }
                    }
                } else {
                    async_effect! {
                        match platform.delete_like(kind, entity_id, user_id).await {
                            Ok(()) => Some(LikeAction::WriteSucceeded),
                            Err(err) => Some(LikeAction::WriteFailed {
                                message: err.to_string(),
                            }),
                        }
                    }
                };
                wayfare_core::smallvec![effect]
            }

            LikeAction::WriteSucceeded => {
                state.rollback = None;
                SmallVec::new()
            }

            LikeAction::WriteFailed { message } => {
                tracing::error!(error = %message, entity_id = %state.entity_id, "Like write failed, rolling back");
                if let Some((is_liked, likes_count)) = state.rollback.take() {
                    state.is_liked = is_liked;
                    state.likes_count = likes_count;
                }
                SmallVec::new()
            }
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

/// Comment-thread state for one entity.
#[derive(Clone, Debug)]
pub struct CommentsState {
    /// Which relation pair the entity lives in
    pub kind: SocialEntityKind,
    /// The commented entity
    pub entity_id: Uuid,
    /// Comments in ascending creation-time order
    pub comments: Vec<CommentRow>,
    /// The compose input
    pub input: String,
    /// Set when an unauthenticated actor submits
    pub login_redirect: bool,
}

impl CommentsState {
    /// Thread state as first rendered from a fetched list.
    #[must_use]
    pub const fn new(kind: SocialEntityKind, entity_id: Uuid, comments: Vec<CommentRow>) -> Self {
        Self {
            kind,
            entity_id,
            comments,
            input: String::new(),
            login_redirect: false,
        }
    }
}

/// Every input to the comment thread.
#[derive(Clone, Debug)]
pub enum CommentsAction {
    /// The compose input changed
    InputChanged(String),
    /// Post the typed comment
    Submit,
    /// Remote insert landed; append the stored row
    PostSucceeded {
        /// The row with server-assigned id and timestamp
        row: CommentRow,
    },
    /// Remote insert failed; restore the typed text
    PostFailed {
        /// What the user had typed
        original_text: String,
        /// Platform error text, for the log
        message: String,
    },
    /// Delete a comment
    Delete {
        /// Which comment
        comment_id: Uuid,
    },
    /// Remote delete failed; re-fetch the whole thread
    DeleteFailed {
        /// Platform error text, for the log
        message: String,
    },
    /// Full thread re-fetch landed
    Refreshed {
        /// The authoritative list
        rows: Vec<CommentRow>,
    },
    /// Full thread re-fetch failed; keep the local list
    RefreshFailed {
        /// Platform error text, for the log
        message: String,
    },
}

/// Reducer for the comment thread.
#[derive(Clone, Debug, Default)]
pub struct CommentsReducer;

impl CommentsReducer {
    /// Creates a new `CommentsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CommentsReducer {
    type State = CommentsState;
    type Action = CommentsAction;
    type Environment = SocialEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CommentsAction::InputChanged(text) => {
                state.input = text;
                SmallVec::new()
            }

            CommentsAction::Submit => {
                let text = state.input.trim().to_string();
                if text.is_empty() {
                    return SmallVec::new();
                }
                let Some(user) = env.session else {
                    state.login_redirect = true;
                    return SmallVec::new();
                };
                let Some(platform) = env.platform.clone() else {
                    return SmallVec::new();
                };

                // Optimistic: the input clears before the write resolves.
                state.input.clear();

                let kind = state.kind;
                let comment = NewComment {
                    entity_id: state.entity_id,
                    user_id: *user.as_uuid(),
                    text: text.clone(),
                };
                let effect = async_effect! {
                    match platform.insert_comment(kind, comment).await {
                        Ok(row) => Some(CommentsAction::PostSucceeded { row }),
                        Err(err) => Some(CommentsAction::PostFailed {
                            original_text: text,
                            message: err.to_string(),
                        }),
                    }
                };
                wayfare_core::smallvec![effect]
            }

            CommentsAction::PostSucceeded { row } => {
                // Optimistic appends go at the tail; server order is ascending
                // by creation time, so this holds under normal clocks.
                state.comments.push(row);
                (env.on_comment_added)();
                SmallVec::new()
            }

            CommentsAction::PostFailed {
                original_text,
                message,
            } => {
                tracing::error!(error = %message, entity_id = %state.entity_id, "Comment post failed, restoring input");
                state.input = original_text;
                SmallVec::new()
            }

            CommentsAction::Delete { comment_id } => {
                let Some(user) = env.session else {
                    state.login_redirect = true;
                    return SmallVec::new();
                };
                let Some(platform) = env.platform.clone() else {
                    return SmallVec::new();
                };

                // Optimistic removal; failure resynchronizes with a full
                // re-fetch rather than a single-item patch.
                state.comments.retain(|comment| comment.id != comment_id);

                let kind = state.kind;
                let author_id = *user.as_uuid();
                let effect = async_effect! {
                    match platform.delete_comment(kind, comment_id, author_id).await {
                        Ok(()) => None,
                        Err(err) => Some(CommentsAction::DeleteFailed {
                            message: err.to_string(),
                        }),
                    }
                };
                wayfare_core::smallvec![effect]
            }

            CommentsAction::DeleteFailed { message } => {
                tracing::error!(error = %message, entity_id = %state.entity_id, "Comment delete failed, re-fetching thread");
                let Some(platform) = env.platform.clone() else {
                    return SmallVec::new();
                };
                let kind = state.kind;
                let entity_id = state.entity_id;
                let effect = async_effect! {
                    match platform.list_comments(kind, entity_id).await {
                        Ok(rows) => Some(CommentsAction::Refreshed { rows }),
                        Err(err) => Some(CommentsAction::RefreshFailed {
                            message: err.to_string(),
                        }),
                    }
                };
                wayfare_core::smallvec![effect]
            }

            CommentsAction::Refreshed { rows } => {
                state.comments = rows;
                SmallVec::new()
            }

            CommentsAction::RefreshFailed { message } => {
                tracing::error!(error = %message, entity_id = %state.entity_id, "Comment re-fetch failed, keeping local list");
                SmallVec::new()
            }
        }
    }
}
