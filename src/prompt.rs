//! Prompt synthesis for the two generation workflows.
//!
//! Both builders are pure: the same inputs always yield byte-identical prompts.
//! The field order of the advice prompt is part of its contract.

use crate::profile::{Choice, Profile};

/// Builds the career advice prompt from a validated profile.
pub fn build_advice_prompt(profile: &Profile) -> String {
    format!(
        "Based on the following user information, provide detailed career advice and job suggestions:\n\
         \n\
         Education: {education}\n\
         Skills: {skills}\n\
         Personality: {personality}\n\
         Work Experience: {experience}\n\
         Work Environment Preference: {environment}\n\
         Career Interests: {interests}\n\
         Preferred Industry: {industry}\n\
         Preferred Work Style: {style}\n\
         Work Location: {location}\n\
         Desired Work Schedule: {schedule}\n\
         \n\
         Please provide:\n\
         1. A list of 3-5 suitable job roles\n\
         2. Brief explanations of why each role is a good fit\n\
         3. Suggestions for skills to develop or improve\n\
         4. Advice on how to pursue these career paths\n",
        education = profile.education,
        skills = profile.skills.join(", "),
        personality = profile.personality,
        experience = profile.work_experience_years,
        environment = profile.work_environment.label(),
        interests = profile.career_interests.label(),
        industry = profile.preferred_industry.label(),
        style = profile.preferred_work_style.label(),
        location = profile.work_location,
        schedule = profile.work_schedule.label(),
    )
}

/// Builds the resume tailoring prompt. Both inputs are embedded verbatim.
pub fn build_resume_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "Based on the following resume content and Job Description, create a tailored resume:\n\
         \n\
         Original Resume:\n\
         {resume_text}\n\
         \n\
         Job Description:\n\
         {job_description}\n\
         \n\
         Please provide a tailored resume that:\n\
         1. Highlights relevant skills and experiences for the Job Description\n\
         2. Adjusts the summary or objective statement to match the Job Description\n\
         3. Reorganizes and emphasizes relevant achievements\n\
         4. Suggests any additional skills or experiences that could be beneficial to include\n\
         \n\
         Format the resume in a clear, professional structure using Markdown.\n"
    )
}
