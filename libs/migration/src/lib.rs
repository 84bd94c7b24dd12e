pub use sea_orm_migration::prelude::*;

mod m20261018_000000_bootstrap;
mod m20261018_000001_create_files;
mod m20261018_000002_create_taxonomy;
mod m20261018_000003_create_products;
mod m20261018_000004_create_sales;
mod m20261018_000005_create_orders;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000000_bootstrap::Migration),
            Box::new(m20261018_000001_create_files::Migration),
            Box::new(m20261018_000002_create_taxonomy::Migration),
            Box::new(m20261018_000003_create_products::Migration),
            Box::new(m20261018_000004_create_sales::Migration),
            Box::new(m20261018_000005_create_orders::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_and_unique() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert!(names[0].ends_with("bootstrap"));
    }
}
