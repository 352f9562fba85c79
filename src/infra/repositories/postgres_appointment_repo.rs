use crate::domain::{models::appointment::Appointment, ports::{AppointmentListFilter, AppointmentRepository}};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PostgresAppointmentRepo {
    async fn create(&self, a: &Appointment) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (id, service_type, status, customer_name, customer_email, customer_phone, customer_address, customer_notes, scheduled_date, start_time, end_time, duration_min, technician_id, technician_name, equipment_type, equipment_brand, issue_description, estimated_cost, created_by, reminder_sent, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
             RETURNING *"
        )
            .bind(&a.id).bind(&a.service_type).bind(a.status.as_str()).bind(&a.customer_name)
            .bind(&a.customer_email).bind(&a.customer_phone).bind(&a.customer_address).bind(&a.customer_notes)
            .bind(a.scheduled_date).bind(a.start_time.to_string()).bind(a.end_time.to_string()).bind(a.duration_min)
            .bind(&a.technician_id).bind(&a.technician_name).bind(&a.equipment_type).bind(&a.equipment_brand)
            .bind(&a.issue_description).bind(a.estimated_cost).bind(a.created_by.as_str()).bind(a.reminder_sent)
            .bind(a.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &AppointmentListFilter) -> Result<Vec<Appointment>, AppError> {
        let mut sql = String::from("SELECT * FROM appointments WHERE 1=1");
        let mut idx = 0;
        let mut next = move || { idx += 1; idx };
        if filter.date.is_some() { sql.push_str(&format!(" AND scheduled_date = ${}", next())); }
        if filter.start_date.is_some() { sql.push_str(&format!(" AND scheduled_date >= ${}", next())); }
        if filter.end_date.is_some() { sql.push_str(&format!(" AND scheduled_date <= ${}", next())); }
        if filter.status.is_some() { sql.push_str(&format!(" AND status = ${}", next())); }
        if filter.service_type.is_some() { sql.push_str(&format!(" AND service_type = ${}", next())); }
        if filter.technician_id.is_some() { sql.push_str(&format!(" AND technician_id = ${}", next())); }
        if filter.customer.is_some() { sql.push_str(&format!(" AND (customer_email = ${} OR customer_phone = ${})", next(), next())); }
        sql.push_str(" ORDER BY scheduled_date ASC, start_time ASC");

        let mut query = sqlx::query_as::<_, Appointment>(&sql);
        if let Some(date) = filter.date { query = query.bind(date); }
        if let Some(start) = filter.start_date { query = query.bind(start); }
        if let Some(end) = filter.end_date { query = query.bind(end); }
        if let Some(status) = filter.status { query = query.bind(status.as_str()); }
        if let Some(service_type) = &filter.service_type { query = query.bind(service_type); }
        if let Some(technician_id) = &filter.technician_id { query = query.bind(technician_id); }
        if let Some(customer) = &filter.customer { query = query.bind(customer).bind(customer); }

        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_obstructing_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE scheduled_date = $1 AND status NOT IN ('cancelled', 'no-show') ORDER BY start_time ASC"
        ).bind(date).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, a: &Appointment) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET service_type=$1, status=$2, customer_name=$3, customer_email=$4, customer_phone=$5, customer_address=$6, customer_notes=$7, scheduled_date=$8, start_time=$9, end_time=$10, duration_min=$11, technician_id=$12, technician_name=$13, equipment_type=$14, equipment_brand=$15, issue_description=$16, estimated_cost=$17, reminder_sent=$18
             WHERE id=$19
             RETURNING *"
        )
            .bind(&a.service_type).bind(a.status.as_str()).bind(&a.customer_name).bind(&a.customer_email)
            .bind(&a.customer_phone).bind(&a.customer_address).bind(&a.customer_notes).bind(a.scheduled_date)
            .bind(a.start_time.to_string()).bind(a.end_time.to_string()).bind(a.duration_min)
            .bind(&a.technician_id).bind(&a.technician_name).bind(&a.equipment_type).bind(&a.equipment_brand)
            .bind(&a.issue_description).bind(a.estimated_cost).bind(a.reminder_sent)
            .bind(&a.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Appointment not found".into())); }
        Ok(())
    }

    async fn list_due_reminders(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE status IN ('pending', 'confirmed') AND reminder_sent = FALSE AND scheduled_date >= $1 AND scheduled_date <= $2"
        ).bind(from).bind(to).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn mark_reminder_sent(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE appointments SET reminder_sent = TRUE WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
