use duo_core::model::{Course, CourseType, Difficulty};
use duo_core::time::format_deadline;

/// Card data for the course catalogs.
#[derive(Clone, Debug, PartialEq)]
pub struct CourseCardVm {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub difficulty_label: &'static str,
    pub difficulty_class: &'static str,
    pub exp_label: Option<String>,
    pub deadline_label: Option<String>,
    pub startable: bool,
}

#[must_use]
pub fn map_course_cards(
    courses: &[Course],
    startable: impl Fn(&Course) -> bool,
) -> Vec<CourseCardVm> {
    courses
        .iter()
        .map(|course| {
            let (difficulty_label, difficulty_class) = difficulty_badge(course.difficulty);
            CourseCardVm {
                id: course.id.value(),
                title: course.title.clone(),
                description: course.description.clone(),
                difficulty_label,
                difficulty_class,
                exp_label: (course.course_type == CourseType::Singleplayer)
                    .then(|| format!("+{} XP", course.exp_reward)),
                deadline_label: course.deadline.map(format_deadline),
                startable: startable(course),
            }
        })
        .collect()
}

fn difficulty_badge(difficulty: Difficulty) -> (&'static str, &'static str) {
    match difficulty {
        Difficulty::Easy => ("Easy", "badge badge--easy"),
        Difficulty::Medium => ("Medium", "badge badge--medium"),
        Difficulty::Hard => ("Hard", "badge badge--hard"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duo_core::model::CourseId;

    fn course(course_type: CourseType, exp_reward: u32) -> Course {
        Course {
            id: CourseId::new(1),
            title: "Basics".into(),
            description: "intro".into(),
            difficulty: Difficulty::Hard,
            exp_reward,
            course_type,
            deadline: None,
            questions: Vec::new(),
        }
    }

    #[test]
    fn singleplayer_cards_show_the_reward() {
        let cards = map_course_cards(&[course(CourseType::Singleplayer, 40)], |_| true);
        assert_eq!(cards[0].exp_label.as_deref(), Some("+40 XP"));
        assert_eq!(cards[0].difficulty_class, "badge badge--hard");
        assert!(cards[0].startable);
    }

    #[test]
    fn multiplayer_cards_hide_the_reward() {
        let cards = map_course_cards(&[course(CourseType::Multiplayer, 0)], |_| false);
        assert!(cards[0].exp_label.is_none());
        assert!(!cards[0].startable);
    }
}
