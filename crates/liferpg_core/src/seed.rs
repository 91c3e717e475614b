//! Default category seed data.

use crate::model::category::Category;
use crate::repo::{RepoResult, Store};
use log::info;

struct SeedCategory {
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    color: &'static str,
    base_xp: i64,
}

const DEFAULT_CATEGORIES: [SeedCategory; 10] = [
    SeedCategory {
        name: "Salud",
        description: "Ejercicio, alimentación, descanso y bienestar físico",
        icon: "fitness",
        color: "#4CAF50",
        base_xp: 15,
    },
    SeedCategory {
        name: "Productividad",
        description: "Trabajo, estudios y tareas profesionales",
        icon: "briefcase",
        color: "#2196F3",
        base_xp: 20,
    },
    SeedCategory {
        name: "Aprendizaje",
        description: "Lectura, cursos y desarrollo de habilidades",
        icon: "school",
        color: "#9C27B0",
        base_xp: 25,
    },
    SeedCategory {
        name: "Finanzas",
        description: "Ahorro, inversiones y gestión del dinero",
        icon: "cash",
        color: "#FF9800",
        base_xp: 20,
    },
    SeedCategory {
        name: "Social",
        description: "Relaciones, familia y conexiones sociales",
        icon: "people",
        color: "#E91E63",
        base_xp: 15,
    },
    SeedCategory {
        name: "Hogar",
        description: "Limpieza, organización y mantenimiento del hogar",
        icon: "home",
        color: "#795548",
        base_xp: 10,
    },
    SeedCategory {
        name: "Creatividad",
        description: "Arte, música, escritura y proyectos creativos",
        icon: "color-palette",
        color: "#00BCD4",
        base_xp: 20,
    },
    SeedCategory {
        name: "Mindfulness",
        description: "Meditación, reflexión y bienestar mental",
        icon: "leaf",
        color: "#8BC34A",
        base_xp: 15,
    },
    SeedCategory {
        name: "Aventura",
        description: "Viajes, exploración y nuevas experiencias",
        icon: "compass",
        color: "#FF5722",
        base_xp: 30,
    },
    SeedCategory {
        name: "Hábitos",
        description: "Rutinas diarias y hábitos generales",
        icon: "repeat",
        color: "#607D8B",
        base_xp: 10,
    },
];

/// Inserts the default categories into an empty store.
///
/// Returns `false` without touching anything when categories already
/// exist, so repeated startup calls are safe.
pub fn seed_default_categories<S: Store>(store: &S) -> RepoResult<bool> {
    if store.count_categories()? > 0 {
        return Ok(false);
    }

    for seed in &DEFAULT_CATEGORIES {
        store.create_category(&Category::new(
            seed.name,
            seed.description,
            seed.icon,
            seed.color,
            seed.base_xp,
        ))?;
    }

    info!(
        "event=seed_categories module=seed status=ok count={}",
        DEFAULT_CATEGORIES.len()
    );
    Ok(true)
}
