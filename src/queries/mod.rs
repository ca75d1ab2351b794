pub mod reminder_queries;
