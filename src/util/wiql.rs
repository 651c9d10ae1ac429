/// Quote a string literal for WIQL, doubling embedded single quotes.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Every non-closed work item in `project`, highest priority first.
pub fn open_items_query(project: &str) -> String {
    format!(
        "SELECT [System.Id] FROM WorkItems \
         WHERE [System.TeamProject] = {} AND [System.State] <> 'Closed' \
         ORDER BY [Microsoft.VSTS.Common.Priority] ASC",
        quote(project)
    )
}
