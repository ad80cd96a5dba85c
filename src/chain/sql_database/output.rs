use serde::Serialize;

/// One recorded stage of a [`SQLDatabaseChain`](super::SQLDatabaseChain) run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum IntermediateStep {
    /// Inputs of the SQL generation call.
    Generation {
        input: String,
        top_k: usize,
        dialect: String,
        table_info: String,
    },
    /// SQL as produced by the model.
    Sql { sql_cmd: String },
    /// SQL after the query checker rewrote it.
    CheckedSql { sql_cmd: String },
    SqlResult { result: String },
    /// Final prompt input and the extracted answer.
    Answer { input: String, answer: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlChainOutput {
    pub result: String,
    pub intermediate_steps: Vec<IntermediateStep>,
}

impl SqlChainOutput {
    /// The SQL that was executed, if the run got that far.
    pub fn sql(&self) -> Option<&str> {
        self.intermediate_steps.iter().rev().find_map(|step| match step {
            IntermediateStep::Sql { sql_cmd } | IntermediateStep::CheckedSql { sql_cmd } => {
                Some(sql_cmd.as_str())
            }
            _ => None,
        })
    }
}
