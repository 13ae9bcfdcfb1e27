//! JSON command protocol between the engine and provider binaries.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::group::Group;
use crate::push::PushOutcome;
use crate::schedule::ClassSlot;
use crate::user::User;

/// A typed provider command.
///
/// The response type is pinned by the command, so a call site gets
/// compile-time safety on what comes back.
pub trait BridgeCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ListGroups,
    GroupsWithMember,
    GetUser,
    ListEndedEvents,
    ListTerms,
    ListSubjects,
    ListEndedExams,
    ListClasses,
    SendPush,
}

/// Request sent to the provider. `config` carries the provider-specific
/// settings from the daemon config, opaque to the engine.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent back by the provider.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    /// Serialized success envelope, for provider binaries to print.
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    /// Serialized error envelope, for provider binaries to print.
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            error: msg.to_string(),
        })
        .unwrap()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListGroups {}

impl BridgeCommand for ListGroups {
    type Response = Vec<Group>;
    fn command() -> Command {
        Command::ListGroups
    }
}

/// Groups whose member list contains the user (array-membership query).
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupsWithMember {
    pub user_id: String,
}

impl BridgeCommand for GroupsWithMember {
    type Response = Vec<Group>;
    fn command() -> Command {
        Command::GroupsWithMember
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetUser {
    pub user_id: String,
}

impl BridgeCommand for GetUser {
    type Response = Option<User>;
    fn command() -> Command {
        Command::GetUser
    }
}

/// Personal events with an end instant in `[from, to]`, both inclusive.
/// Bounds are RFC 3339.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEndedEvents {
    pub user_id: String,
    pub from: String,
    pub to: String,
}

impl BridgeCommand for ListEndedEvents {
    type Response = Vec<String>;
    fn command() -> Command {
        Command::ListEndedEvents
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListTerms {
    pub user_id: String,
}

impl BridgeCommand for ListTerms {
    type Response = Vec<String>;
    fn command() -> Command {
        Command::ListTerms
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListSubjects {
    pub user_id: String,
    pub term_id: String,
}

impl BridgeCommand for ListSubjects {
    type Response = Vec<String>;
    fn command() -> Command {
        Command::ListSubjects
    }
}

/// Exams under one subject with an end instant in `[from, to]`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListEndedExams {
    pub user_id: String,
    pub term_id: String,
    pub subject_id: String,
    pub from: String,
    pub to: String,
}

impl BridgeCommand for ListEndedExams {
    type Response = Vec<String>;
    fn command() -> Command {
        Command::ListEndedExams
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListClasses {
    pub user_id: String,
    pub term_id: String,
    pub subject_id: String,
}

impl BridgeCommand for ListClasses {
    type Response = Vec<ClassSlot>;
    fn command() -> Command {
        Command::ListClasses
    }
}

/// One batched multicast push.
#[derive(Debug, Serialize, Deserialize)]
pub struct SendPush {
    pub title: String,
    pub body: String,
    pub tokens: Vec<String>,
}

impl BridgeCommand for SendPush {
    type Response = PushOutcome;
    fn command() -> Command {
        Command::SendPush
    }
}
