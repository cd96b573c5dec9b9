pub const QUESTION_COUNT: usize = 12;

/// The questionnaire, in the order it is asked. The first eight are shadow
/// work prompts, the last four are Socratic questions.
pub static QUESTIONS: [&str; QUESTION_COUNT] = [
    "What is a personality trait you dislike in others that you might also see in yourself?",
    "Describe a time you felt intensely jealous. What was that situation trying to teach you about your own desires or insecurities?",
    "What's a secret you've kept from everyone? What do you fear would happen if it came out?",
    "Think about a recurring negative pattern in your relationships (platonic or romantic). What is your role in this pattern?",
    "What are you most afraid of people discovering about you?",
    "In what ways do you self-sabotage when you are close to achieving a goal or finding happiness?",
    "What emotion do you find most difficult to express, and why?",
    "Describe a version of yourself that you are trying to hide or suppress. What does this 'shadow self' want?",
    "What is the evidence for and against the belief that you are not 'good enough'?",
    "What is an alternative way of looking at a recent challenge you've faced?",
    "If you didn't have the fear of failure or judgment, what is the first thing you would do differently in your life?",
    "What assumptions are you making about your future based on your past experiences?",
];
