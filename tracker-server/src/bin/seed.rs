//! Demo data seeder
//!
//! Clears the store and loads the demo dataset: three employees, an admin
//! plus two linked employee accounts, and seven tasks.
//!
//! Run: `cargo run --bin seed`

use anyhow::Context;
use tracker_server::db::models::{
    EmployeeCreate, EmployeeId, Role, TaskCreate, TaskStatus, UserCreate,
};
use tracker_server::db::repository::{EmployeeRepository, TaskRepository, UserRepository};
use tracker_server::utils::logger;
use tracker_server::{Config, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logger::init_logger();

    let config = Config::from_env()?;
    let state = ServerState::initialize(&config).await?;
    let db = state.get_db();

    tracing::info!("Connected to database for seeding");

    // Clear existing data
    db.query("DELETE task; DELETE user; DELETE employee;")
        .await
        .context("failed to clear tables")?;

    // Create employees
    let employees_repo = EmployeeRepository::new(db.clone());
    let mut employee_ids: Vec<EmployeeId> = Vec::new();
    for name in ["Alice Johnson", "Bob Smith", "Carol Davis"] {
        let employee = employees_repo
            .create(EmployeeCreate { name: name.into() })
            .await?;
        let id = employee
            .id
            .clone()
            .context("created employee has no id")?;
        employee_ids.push(id);
    }

    // Create demo users
    let users_repo = UserRepository::new(db.clone());
    users_repo
        .create(UserCreate {
            name: "Admin User".into(),
            email: "admin@demo.com".into(),
            password: "password123".into(),
            role: Role::Admin,
            employee: None,
        })
        .await?;
    users_repo
        .create(UserCreate {
            name: "Alice Johnson".into(),
            email: "employee@demo.com".into(),
            password: "password123".into(),
            role: Role::Employee,
            employee: Some(employee_ids[0].clone()),
        })
        .await?;
    users_repo
        .create(UserCreate {
            name: "Bob Smith".into(),
            email: "bob@demo.com".into(),
            password: "password123".into(),
            role: Role::Employee,
            employee: Some(employee_ids[1].clone()),
        })
        .await?;

    // Create tasks
    let tasks_repo = TaskRepository::new(db.clone());
    let tasks = [
        ("Prepare monthly report", "Compile the monthly sales report", TaskStatus::InProgress, 0),
        ("Deploy release", "Deploy v1.2.0 to production", TaskStatus::Pending, 1),
        ("Fix login bug", "Resolve 500 on login", TaskStatus::Completed, 0),
        ("Design landing page", "Create hero section", TaskStatus::Pending, 2),
        ("Update documentation", "Update API documentation", TaskStatus::Completed, 1),
        ("Setup CI/CD pipeline", "Configure automated deployment", TaskStatus::InProgress, 0),
        ("Code review", "Review pull requests", TaskStatus::Pending, 2),
    ];
    for (title, description, status, employee_idx) in tasks {
        tasks_repo
            .create(TaskCreate {
                title: title.into(),
                description: Some(description.into()),
                status: Some(status),
                employee_id: employee_ids[employee_idx].to_string(),
            })
            .await?;
    }

    tracing::info!("Seed data created successfully");
    tracing::info!("Demo accounts:");
    tracing::info!("  Admin:      admin@demo.com / password123");
    tracing::info!("  Employee:   employee@demo.com / password123");
    tracing::info!("  Employee 2: bob@demo.com / password123");

    Ok(())
}
