use crate::models::quiz::{Question, Quiz};
use crate::models::result::{AnswerRecord, QuizResult};
use crate::models::timetable::{SchoolClass, Subject, Teacher};
use crate::models::user::{User, ROLE_ADMIN, ROLE_STUDENT};
use chrono::{Duration, Utc};
use uuid::Uuid;

pub const DEMO_PASSWORD: &str = "password123";

/// Everything the demo deployment starts with: two accounts, two published
/// quizzes, one historical result and a small school roster.
#[derive(Default)]
pub struct DemoData {
    pub users: Vec<User>,
    pub quizzes: Vec<Quiz>,
    pub results: Vec<QuizResult>,
    pub subjects: Vec<Subject>,
    pub teachers: Vec<Teacher>,
    pub classes: Vec<SchoolClass>,
}

pub fn demo_data() -> DemoData {
    let student_id = Uuid::new_v4();
    let admin_id = Uuid::new_v4();

    let users = vec![
        User {
            id: student_id,
            username: "user1".to_string(),
            email: "user1@example.com".to_string(),
            password: DEMO_PASSWORD.to_string(),
            role: ROLE_STUDENT.to_string(),
            created_at: Utc::now() - Duration::days(90),
        },
        User {
            id: admin_id,
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password: DEMO_PASSWORD.to_string(),
            role: ROLE_ADMIN.to_string(),
            created_at: Utc::now() - Duration::days(90),
        },
    ];

    let web_quiz_id = Uuid::new_v4();
    let react_quiz_id = Uuid::new_v4();

    let quizzes = vec![
        Quiz {
            id: web_quiz_id,
            title: "Web Development Basics".to_string(),
            description: "Test your knowledge of HTML, CSS, and JavaScript fundamentals."
                .to_string(),
            time_limit_minutes: 10,
            created_by: admin_id,
            is_published: true,
            questions: vec![
                question(
                    "q1",
                    "What does HTML stand for?",
                    [
                        "Hyper Text Markup Language",
                        "High Tech Multi Language",
                        "Hyper Transfer Markup Language",
                        "Home Tool Markup Language",
                    ],
                    0,
                ),
                question(
                    "q2",
                    "Which CSS property is used to change the text color?",
                    ["color", "text-color", "font-color", "text-style"],
                    0,
                ),
                question(
                    "q3",
                    "Which of the following is NOT a JavaScript data type?",
                    ["String", "Boolean", "Float", "Undefined"],
                    2,
                ),
                question(
                    "q4",
                    "What symbol is used for single-line comments in JavaScript?",
                    ["#", "//", "/*", "<!--"],
                    1,
                ),
                question(
                    "q5",
                    "Which CSS property is used to add space between elements?",
                    ["spacing", "margin", "padding", "gap"],
                    1,
                ),
            ],
        },
        Quiz {
            id: react_quiz_id,
            title: "React Fundamentals".to_string(),
            description: "Test your knowledge of React concepts and hooks.".to_string(),
            time_limit_minutes: 15,
            created_by: admin_id,
            is_published: true,
            questions: vec![
                question(
                    "q1",
                    "What is JSX in React?",
                    [
                        "JavaScript XML - A syntax extension for JavaScript",
                        "JavaScript Extra - An additional JavaScript library",
                        "JavaScript Experience - A user interface pattern",
                        "JavaScript Execute - A runtime environment",
                    ],
                    0,
                ),
                question(
                    "q2",
                    "Which hook is used to manage state in a functional component?",
                    ["useEffect", "useState", "useContext", "useReducer"],
                    1,
                ),
                question(
                    "q3",
                    "What is the virtual DOM in React?",
                    [
                        "A complete copy of the real DOM",
                        "A lightweight copy of the real DOM in memory",
                        "A new browser technology developed for React",
                        "A rendering engine specific to mobile devices",
                    ],
                    1,
                ),
                question(
                    "q4",
                    "Which method is NOT part of the React component lifecycle?",
                    [
                        "componentDidMount",
                        "componentWillReceiveProps",
                        "componentDidRender",
                        "componentWillUnmount",
                    ],
                    2,
                ),
                question(
                    "q5",
                    "What is the purpose of React fragments?",
                    [
                        "To optimize rendering performance",
                        "To group multiple elements without adding extra nodes to the DOM",
                        "To create reusable component templates",
                        "To isolate component styling",
                    ],
                    1,
                ),
            ],
        },
    ];

    let results = vec![QuizResult {
        id: Uuid::new_v4(),
        user_id: student_id,
        quiz_id: web_quiz_id,
        score: 30,
        max_score: 50,
        time_taken_seconds: 350,
        completed_at: Utc::now() - Duration::days(30),
        answers: vec![
            AnswerRecord {
                question_id: "q1".to_string(),
                selected_option: 0,
                is_correct: true,
            },
            AnswerRecord {
                question_id: "q2".to_string(),
                selected_option: 0,
                is_correct: true,
            },
            AnswerRecord {
                question_id: "q3".to_string(),
                selected_option: 3,
                is_correct: false,
            },
            AnswerRecord {
                question_id: "q4".to_string(),
                selected_option: 1,
                is_correct: true,
            },
            AnswerRecord {
                question_id: "q5".to_string(),
                selected_option: 3,
                is_correct: false,
            },
        ],
    }];

    let math_id = Uuid::new_v4();
    let physics_id = Uuid::new_v4();
    let cs_id = Uuid::new_v4();

    let subjects = vec![
        Subject {
            id: math_id,
            name: "Mathematics".to_string(),
            code: "MATH101".to_string(),
            credits: 4,
        },
        Subject {
            id: physics_id,
            name: "Physics".to_string(),
            code: "PHYS101".to_string(),
            credits: 3,
        },
        Subject {
            id: cs_id,
            name: "Computer Science".to_string(),
            code: "CS101".to_string(),
            credits: 3,
        },
    ];

    let teachers = vec![
        Teacher {
            id: Uuid::new_v4(),
            name: "Sarah Johnson".to_string(),
            email: "sarah.johnson@example.com".to_string(),
            subjects: vec![math_id, physics_id],
        },
        Teacher {
            id: Uuid::new_v4(),
            name: "David Chen".to_string(),
            email: "david.chen@example.com".to_string(),
            subjects: vec![cs_id, math_id],
        },
    ];

    let classes = vec![
        SchoolClass {
            id: Uuid::new_v4(),
            name: "9A".to_string(),
            year: 9,
            division: "A".to_string(),
            subjects: vec![math_id, physics_id],
        },
        SchoolClass {
            id: Uuid::new_v4(),
            name: "10B".to_string(),
            year: 10,
            division: "B".to_string(),
            subjects: vec![math_id, cs_id],
        },
    ];

    DemoData {
        users,
        quizzes,
        results,
        subjects,
        teachers,
        classes,
    }
}

fn question(id: &str, text: &str, options: [&str; 4], correct_option: i32) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_option,
        points: 10,
    }
}
