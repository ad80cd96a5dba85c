use indoc::formatdoc;

/// Wraps a question in the product-catalog instructions sent to the query
/// chain. The question is embedded as-is.
pub fn prepare_agent_prompt(input_text: &str) -> String {
    formatdoc! {"
        Generate a PostgreSQL query based on the provided input.

        Ensure that the query uses PostgreSQL syntax.
        Utilize the shoe_color enum to filter by color, ensuring that only valid color values are queried.
        Similarly, utilize the shoe_width enum to filter by width, ensuring that only valid width values are queried.
        Note that the color and width columns are of array types, while the name column is of type VARCHAR.

        An example query using an array column would be:
        SELECT * FROM products, unnest(color) AS col WHERE col::text % SOME_COLOR;
        or
        SELECT * FROM products, unnest(width) AS wid WHERE wid::text % SOME_WIDTH;

        An example query using the name column would be:
        SELECT * FROM products WHERE name ILIKE '%input_text%';

        It's not necessary to search on all columns, only those relevant to the query.

        Generate a PostgreSQL query using the provided input:
        {input_text}

        Respond as a human would.
    "}
}
