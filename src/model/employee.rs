use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "full_name": "John Doe",
        "department": "Engineering",
        "joining_date": "2022-03-01"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(
        example = "2022-03-01",
        value_type = String,
        format = "date"
    )]
    pub joining_date: NaiveDate,
}

/// Employee fields supplied by the caller; the store assigns the id.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
    pub full_name: String,
    pub department: String,
    pub joining_date: NaiveDate,
}
