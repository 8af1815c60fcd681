use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Number of financial indicators the classifier was trained on.
pub const FEATURE_COUNT: usize = 10;

/// Column labels of the feature row, in the order the classifier expects them.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "dependencia_emprestimos",
    "rendimento_liquido_patrimonio_acionistas",
    "divida_total_valor_liquido_total",
    "roa_b_antes_juros_depreciacao_apos_imposto",
    "receita_despesa_extra_industria",
    "indice_despesas_juros",
    "valor_liquido_ativos",
    "indice_endividamento",
    "caixa_ativos_totais",
    "capital_giro_patrimonio_liquido",
];

/// Decision threshold used when the caller does not supply one.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

// ============ Request Models ============

/// Financial indicators of one company, as posted to `/predict/`.
///
/// Every field is required. JSON integers are accepted as floats; any other
/// type is rejected. Values are forwarded to the model as-is, without range
/// checks.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct InputRecord {
    /// Loan dependency ratio.
    pub dependencia_emprestimos: f64,
    /// Net income to shareholders' equity.
    pub rendimento_liquido_patrimonio_acionistas: f64,
    /// Total debt to total net worth.
    pub divida_total_valor_liquido_total: f64,
    /// ROA(B) before interest and depreciation, after tax.
    pub roa_b_antes_juros_depreciacao_apos_imposto: f64,
    /// Non-industry income and expenditure to revenue.
    pub receita_despesa_extra_industria: f64,
    /// Interest expense ratio.
    pub indice_despesas_juros: f64,
    /// Net worth to assets.
    pub valor_liquido_ativos: f64,
    /// Debt ratio.
    pub indice_endividamento: f64,
    /// Cash to total assets.
    pub caixa_ativos_totais: f64,
    /// Working capital to equity.
    pub capital_giro_patrimonio_liquido: f64,
}

impl InputRecord {
    /// Builds the single-row table handed to the classifier.
    ///
    /// Column order follows [`FEATURE_NAMES`] and never varies between requests.
    pub fn to_row(&self) -> FeatureRow {
        FeatureRow {
            values: [
                self.dependencia_emprestimos,
                self.rendimento_liquido_patrimonio_acionistas,
                self.divida_total_valor_liquido_total,
                self.roa_b_antes_juros_depreciacao_apos_imposto,
                self.receita_despesa_extra_industria,
                self.indice_despesas_juros,
                self.valor_liquido_ativos,
                self.indice_endividamento,
                self.caixa_ativos_totais,
                self.capital_giro_patrimonio_liquido,
            ],
        }
    }
}

/// Query parameters of the prediction endpoint.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PredictParams {
    /// Probability above which the record is labelled as bankrupt (class 1).
    #[serde(default = "default_threshold")]
    #[param(default = 0.5)]
    pub threshold: f64,
}

impl Default for PredictParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

// ============ Feature Row ============

/// One tabular row of labelled feature values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    values: [f64; FEATURE_COUNT],
}

impl FeatureRow {
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Iterates `(column label, value)` pairs in model order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }
}

// ============ Response Models ============

/// Outcome of one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct PredictionResult {
    /// 1 when the probability is strictly above the threshold, otherwise 0.
    pub prediction: u8,
    /// Estimated probability of bankruptcy (class 1).
    pub probability: f64,
}

impl PredictionResult {
    /// Labels `probability` against `threshold`.
    ///
    /// The comparison is strict: a probability equal to the threshold is class 0.
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        let prediction = if probability > threshold { 1 } else { 0 };
        Self {
            prediction,
            probability,
        }
    }
}
