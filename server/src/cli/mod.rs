pub mod database_migration;
