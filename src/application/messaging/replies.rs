//! User-facing reply texts

use crate::application::errors::ApiError;
use crate::domain::entities::Weather;

pub const WELCOME: &str = "Привет! Я бот погоды и рекомендаций. Отправьте мне название города, чтобы узнать погоду и получить рекомендации по выбору одежды для выхода на улицу.";

/// Prefix for the advice reply
pub const ADVICE_LABEL: &str = "Совет: ";

pub const NO_ADVICE: &str = "Совет: к сожалению, рекомендаций по одежде для этой погоды нет.";

pub fn weather_summary(weather: &Weather) -> String {
    let current = &weather.current;
    format!(
        "Город: {}\nТемпература: {:.1}°C\nВлажность: {}%\nСкорость ветра: {:.1} км/ч\nУсловия: {}",
        weather.place(),
        current.temperature_c,
        current.humidity,
        current.wind_kph,
        current.condition.text
    )
}

pub fn advice(recommendation: &str) -> String {
    if recommendation.trim().is_empty() {
        return NO_ADVICE.to_string();
    }
    format!("{}{}", ADVICE_LABEL, recommendation)
}

pub fn weather_failure(location: &str) -> String {
    format!("Ошибка получения данных о погоде в {}, попробуйте снова.", location)
}

pub fn recommendation_failure(error: &ApiError) -> String {
    format!("Ошибка получения рекомендаций: {}.", error.user_description())
}

pub fn unknown_command(name: &str) -> String {
    format!(
        "Неизвестная команда /{}. Отправьте название города или /start для справки.",
        name
    )
}
