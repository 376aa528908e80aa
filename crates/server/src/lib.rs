use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod groups;
mod history;
mod ledger;
mod server;
mod views;

pub mod types {
    pub mod group {
        pub use api_types::group::{GroupNew, GroupView, MemberNew, MemberView, MembersResponse};
    }

    pub mod expense {
        pub use api_types::expense::{
            ExpenseNew, ExpenseView, ShareAmount, SharePercent, SplitDetailView, SplitInput,
            SplitMethod,
        };
    }

    pub mod settlement {
        pub use api_types::settlement::{SettlementNew, SettlementView};
    }

    pub mod balance {
        pub use api_types::balance::{BalanceView, BalancesResponse, DebtView, DebtsResponse};
    }

    pub mod activity {
        pub use api_types::activity::{ActivityResponse, ActivityView};
    }
}

pub enum ServerError {
    Engine(EngineError),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidSplit(_)
        | EngineError::InvalidSettlement(_)
        | EngineError::InvalidName(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let ServerError::Engine(err) = self;
        let status = status_for_engine_error(&err);
        let error = err.to_string();

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
