use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::Food;

#[derive(Clone)]
pub struct FoodRepository {
    pool: SqlitePool,
}

// Row type for database queries
#[derive(sqlx::FromRow)]
struct FoodRow {
    id: String,
    user_id: String,
    brand_name: Option<String>,
    description: String,
    serving_size: String,
    calories: i64,
    total_fat: Option<i64>,
    saturated_fat: Option<i64>,
    polysaturated_fat: Option<i64>,
    monounsaturated_fat: Option<i64>,
    trans_fat: Option<i64>,
    cholesterol: Option<i64>,
    sodium: Option<i64>,
    potassium: Option<i64>,
    total_carbohydrates: Option<i64>,
    dietary_fiber: Option<i64>,
    sugars: Option<i64>,
    added_sugars: Option<i64>,
    sugar_alcohols: Option<i64>,
    protein: Option<i64>,
    vitamin_a: Option<i64>,
    vitamin_c: Option<i64>,
    calcium: Option<i64>,
    iron: Option<i64>,
    vitamin_d: Option<i64>,
    created_at: String,
    updated_at: String,
}

impl FoodRow {
    fn into_food(self) -> Food {
        Food {
            id: Uuid::parse_str(&self.id).unwrap_or_default(),
            user_id: self.user_id,
            brand_name: self.brand_name,
            description: self.description,
            serving_size: self.serving_size,
            calories: self.calories,
            total_fat: self.total_fat,
            saturated_fat: self.saturated_fat,
            polysaturated_fat: self.polysaturated_fat,
            monounsaturated_fat: self.monounsaturated_fat,
            trans_fat: self.trans_fat,
            cholesterol: self.cholesterol,
            sodium: self.sodium,
            potassium: self.potassium,
            total_carbohydrates: self.total_carbohydrates,
            dietary_fiber: self.dietary_fiber,
            sugars: self.sugars,
            added_sugars: self.added_sugars,
            sugar_alcohols: self.sugar_alcohols,
            protein: self.protein,
            vitamin_a: self.vitamin_a,
            vitamin_c: self.vitamin_c,
            calcium: self.calcium,
            iron: self.iron,
            vitamin_d: self.vitamin_d,
            created_at: DateTime::parse_from_rfc3339(&self.created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            updated_at: DateTime::parse_from_rfc3339(&self.updated_at)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        }
    }
}

impl FoodRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, food: &Food) -> Result<Food, sqlx::Error> {
        let id = food.id.to_string();
        let created_at = food.created_at.to_rfc3339();
        let updated_at = food.updated_at.to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO foods (
                id, user_id, brand_name, description, serving_size, calories,
                total_fat, saturated_fat, polysaturated_fat, monounsaturated_fat,
                trans_fat, cholesterol, sodium, potassium, total_carbohydrates,
                dietary_fiber, sugars, added_sugars, sugar_alcohols, protein,
                vitamin_a, vitamin_c, calcium, iron, vitamin_d,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&food.user_id)
        .bind(&food.brand_name)
        .bind(&food.description)
        .bind(&food.serving_size)
        .bind(food.calories)
        .bind(food.total_fat)
        .bind(food.saturated_fat)
        .bind(food.polysaturated_fat)
        .bind(food.monounsaturated_fat)
        .bind(food.trans_fat)
        .bind(food.cholesterol)
        .bind(food.sodium)
        .bind(food.potassium)
        .bind(food.total_carbohydrates)
        .bind(food.dietary_fiber)
        .bind(food.sugars)
        .bind(food.added_sugars)
        .bind(food.sugar_alcohols)
        .bind(food.protein)
        .bind(food.vitamin_a)
        .bind(food.vitamin_c)
        .bind(food.calcium)
        .bind(food.iron)
        .bind(food.vitamin_d)
        .bind(&created_at)
        .bind(&updated_at)
        .execute(&self.pool)
        .await?;

        // Return the created food
        self.get_by_id(food.id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Food>, sqlx::Error> {
        let id_str = id.to_string();

        let row: Option<FoodRow> = sqlx::query_as("SELECT * FROM foods WHERE id = ?")
            .bind(&id_str)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(FoodRow::into_food))
    }

    pub async fn list(&self) -> Result<Vec<Food>, sqlx::Error> {
        let rows: Vec<FoodRow> = sqlx::query_as("SELECT * FROM foods ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(FoodRow::into_food).collect())
    }

    pub async fn update(&self, food: &Food) -> Result<Food, sqlx::Error> {
        let id = food.id.to_string();
        let updated_at = food.updated_at.to_rfc3339();

        sqlx::query(
            r#"
            UPDATE foods
            SET brand_name = ?, description = ?, serving_size = ?, calories = ?,
                total_fat = ?, saturated_fat = ?, polysaturated_fat = ?,
                monounsaturated_fat = ?, trans_fat = ?, cholesterol = ?,
                sodium = ?, potassium = ?, total_carbohydrates = ?,
                dietary_fiber = ?, sugars = ?, added_sugars = ?,
                sugar_alcohols = ?, protein = ?, vitamin_a = ?, vitamin_c = ?,
                calcium = ?, iron = ?, vitamin_d = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&food.brand_name)
        .bind(&food.description)
        .bind(&food.serving_size)
        .bind(food.calories)
        .bind(food.total_fat)
        .bind(food.saturated_fat)
        .bind(food.polysaturated_fat)
        .bind(food.monounsaturated_fat)
        .bind(food.trans_fat)
        .bind(food.cholesterol)
        .bind(food.sodium)
        .bind(food.potassium)
        .bind(food.total_carbohydrates)
        .bind(food.dietary_fiber)
        .bind(food.sugars)
        .bind(food.added_sugars)
        .bind(food.sugar_alcohols)
        .bind(food.protein)
        .bind(food.vitamin_a)
        .bind(food.vitamin_c)
        .bind(food.calcium)
        .bind(food.iron)
        .bind(food.vitamin_d)
        .bind(&updated_at)
        .bind(&id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(food.id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), sqlx::Error> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM foods WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
