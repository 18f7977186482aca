use serde::Serialize;

use crate::nutrition::dto::NutritionRecord;
use crate::nutrition::error::NutritionError;

/// Nutrients charted for a record, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nutrient {
    Carbohydrates,
    Cholesterol,
    SaturatedFat,
    TotalFat,
    Fiber,
    Potassium,
    Protein,
    Sodium,
    Sugar,
}

impl Nutrient {
    pub const ALL: [Nutrient; 9] = [
        Nutrient::Carbohydrates,
        Nutrient::Cholesterol,
        Nutrient::SaturatedFat,
        Nutrient::TotalFat,
        Nutrient::Fiber,
        Nutrient::Potassium,
        Nutrient::Protein,
        Nutrient::Sodium,
        Nutrient::Sugar,
    ];

    pub fn chart_label(self) -> &'static str {
        match self {
            Nutrient::Carbohydrates => "Carbohydrates (g)",
            Nutrient::Cholesterol => "Cholesterol (mg)",
            Nutrient::SaturatedFat => "Saturated Fat (g)",
            Nutrient::TotalFat => "Total Fat (g)",
            Nutrient::Fiber => "Fiber (g)",
            Nutrient::Potassium => "Potassium (mg)",
            Nutrient::Protein => "Protein (g)",
            Nutrient::Sodium => "Sodium (mg)",
            Nutrient::Sugar => "Sugar (g)",
        }
    }

    pub fn table_label(self) -> &'static str {
        match self {
            Nutrient::Carbohydrates => "Carbohydrates",
            Nutrient::Cholesterol => "Cholesterol",
            Nutrient::SaturatedFat => "Saturated Fat",
            Nutrient::TotalFat => "Total Fat",
            Nutrient::Fiber => "Fiber",
            Nutrient::Potassium => "Potassium",
            Nutrient::Protein => "Protein",
            Nutrient::Sodium => "Sodium",
            Nutrient::Sugar => "Sugar",
        }
    }

    pub fn field(self) -> &'static str {
        match self {
            Nutrient::Carbohydrates => "carbohydrates_total_g",
            Nutrient::Cholesterol => "cholesterol_mg",
            Nutrient::SaturatedFat => "fat_saturated_g",
            Nutrient::TotalFat => "fat_total_g",
            Nutrient::Fiber => "fiber_g",
            Nutrient::Potassium => "potassium_mg",
            Nutrient::Protein => "protein_g",
            Nutrient::Sodium => "sodium_mg",
            Nutrient::Sugar => "sugar_g",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Cholesterol | Nutrient::Potassium | Nutrient::Sodium => "mg",
            _ => "g",
        }
    }

    /// Milligram fields are divided by 1000 so every bar shares one axis.
    pub fn chart_divisor(self) -> f64 {
        match self {
            Nutrient::Cholesterol | Nutrient::Potassium | Nutrient::Sodium => 1000.0,
            _ => 1.0,
        }
    }

    pub fn read(self, record: &NutritionRecord) -> Option<f64> {
        match self {
            Nutrient::Carbohydrates => record.carbohydrates_total_g,
            Nutrient::Cholesterol => record.cholesterol_mg,
            Nutrient::SaturatedFat => record.fat_saturated_g,
            Nutrient::TotalFat => record.fat_total_g,
            Nutrient::Fiber => record.fiber_g,
            Nutrient::Potassium => record.potassium_mg,
            Nutrient::Protein => record.protein_g,
            Nutrient::Sodium => record.sodium_mg,
            Nutrient::Sugar => record.sugar_g,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientPoint {
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientSeries {
    pub points: Vec<NutrientPoint>,
}

impl NutrientSeries {
    pub fn labels(&self) -> Vec<&'static str> {
        self.points.iter().map(|p| p.label).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Maps a record onto the nine chart bars. Fails on the first absent field.
pub fn to_series(record: &NutritionRecord) -> Result<NutrientSeries, NutritionError> {
    let points = Nutrient::ALL
        .iter()
        .map(|&n| {
            let raw = n
                .read(record)
                .ok_or(NutritionError::MissingField { field: n.field() })?;
            Ok(NutrientPoint {
                label: n.chart_label(),
                value: raw / n.chart_divisor(),
            })
        })
        .collect::<Result<Vec<_>, NutritionError>>()?;
    Ok(NutrientSeries { points })
}

/// A row of the nutrient table: unscaled value with its own unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientRow {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

pub fn nutrient_table(record: &NutritionRecord) -> Vec<NutrientRow> {
    Nutrient::ALL
        .iter()
        .filter_map(|&n| {
            n.read(record).map(|value| NutrientRow {
                label: n.table_label(),
                value,
                unit: n.unit(),
            })
        })
        .collect()
}

pub const CHART_TITLE: &str = "Nutritional Values (per 100 grams)";
pub const CHART_DATASET_LABEL: &str = "Nutritional Values";

const BAR_COLORS: [&str; 9] = [
    "rgba(75, 192, 192, 0.6)",
    "rgba(255, 159, 64, 0.6)",
    "rgba(255, 205, 86, 0.6)",
    "rgba(54, 162, 235, 0.6)",
    "rgba(153, 102, 255, 0.6)",
    "rgba(201, 203, 207, 0.6)",
    "rgba(255, 99, 132, 0.6)",
    "rgba(75, 192, 192, 0.6)",
    "rgba(54, 162, 235, 0.6)",
];

/// Bar chart payload ready for a charting front end.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub title: &'static str,
    pub dataset_label: &'static str,
    pub labels: Vec<&'static str>,
    pub data: Vec<f64>,
    pub background_colors: Vec<&'static str>,
    pub border_color: &'static str,
    pub border_width: u32,
}

impl ChartData {
    pub fn from_series(series: &NutrientSeries) -> Self {
        Self {
            title: CHART_TITLE,
            dataset_label: CHART_DATASET_LABEL,
            labels: series.labels(),
            data: series.values(),
            background_colors: BAR_COLORS.iter().copied().take(series.points.len()).collect(),
            border_color: "rgba(75, 192, 192, 1)",
            border_width: 1,
        }
    }
}
