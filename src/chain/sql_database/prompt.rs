use crate::{
    prompt_template,
    schemas::MessageType,
    template::{MessageTemplate, PromptTemplate},
};

pub const PROMPT_SUFFIX: &str = r#"Only use the following tables:
{{table_info}}

Question: {{input}}"#;

pub const DEFAULT_TEMPLATE: &str = r#"Given an input question, first create a syntactically correct {{dialect}} query to run, then look at the results of the query and return the answer. Unless the user specifies in his question a specific number of examples he wishes to obtain, always limit your query to at most {{top_k}} results. You can order the results by a relevant column to return the most interesting examples in the database.

Never query for all the columns from a specific table, only ask for a few relevant columns given the question.

Pay attention to use only the column names that you can see in the schema description. Be careful to not query for columns that do not exist. Also, pay attention to which column is in which table.

Use the following format:

Question: Question here
SQLQuery: SQL Query to run
SQLResult: Result of the SQLQuery
Answer: Final answer here

"#;

pub const POSTGRES_TEMPLATE: &str = r#"You are a PostgreSQL expert. Given an input question, first create a syntactically correct PostgreSQL query to run, then look at the results of the query and return the answer to the input question.
Unless the user specifies in the question a specific number of examples to obtain, query for at most {{top_k}} results using the LIMIT clause as per PostgreSQL. You can order the results to return the most informative data in the database.
Never query for all columns from a table. You must query only the columns that are needed to answer the question. Wrap each column name in double quotes (") to denote them as delimited identifiers.
Pay attention to use only the column names you can see in the tables below. Be careful to not query for columns that do not exist. Also, pay attention to which column is in which table.
Pay attention to use CURRENT_DATE function to get the current date, if the question involves "today".

Use the following format:

Question: Question here
SQLQuery: SQL Query to run
SQLResult: Result of the SQLQuery
Answer: Final answer here

"#;

pub const QUERY_CHECKER: &str = r#"{{query}}
Double check the {{dialect}} query above for common mistakes, including:
- Using NOT IN with NULL values
- Using UNION when UNION ALL should have been used
- Using BETWEEN for exclusive ranges
- Data type mismatch in predicates
- Properly quoting identifiers
- Using the correct number of arguments for functions
- Casting to the correct data type
- Using the proper columns for joins

If there are any of the above mistakes, rewrite the query. If there are no mistakes, just reproduce the original query.

Output the final SQL query only.

SQL Query: "#;

/// Variables a SQL generation prompt may use.
pub const SQL_PROMPT_VARIABLES: [&str; 4] = ["input", "table_info", "dialect", "top_k"];

/// Generation prompt for `dialect`, falling back to the generic one.
pub fn get_prompt_for_dialect(dialect: &str) -> PromptTemplate {
    let template = match dialect.to_lowercase().as_str() {
        "postgresql" | "postgres" => POSTGRES_TEMPLATE,
        _ => DEFAULT_TEMPLATE,
    };

    prompt_template![MessageTemplate::from_jinja2(
        MessageType::Human,
        format!("{template}{PROMPT_SUFFIX}"),
    )]
}

pub fn query_checker_prompt() -> PromptTemplate {
    prompt_template![MessageTemplate::from_jinja2(
        MessageType::Human,
        QUERY_CHECKER
    )]
}
