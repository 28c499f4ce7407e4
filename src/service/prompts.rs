//! Prompt templates. Every feature sends exactly one of these per call.

use crate::types::SkillLevel;

pub fn solve(skill: SkillLevel, topic: &str, problem: &str) -> String {
    format!(
        "Solve this {} level {} problem step by step, providing detailed explanations for each step. Problem: {problem}",
        skill.lower(),
        topic.to_lowercase()
    )
}

const DRAFT_INSTRUCTIONS: &str = r##"Generate a Manim animation script that visually explains the given mathematical problem step by step.
The animation should include text explanations, dynamic equation transformations, relevant geometrical
or graphical representations (if applicable), and smooth transitions using animations like FadeIn, Transform,
and DrawBorderThenFill. Ensure the animations maintain engagement and clarity. Align the animation properly
and one important main thing is I only want the code alone, not any strings other than the code because the
Manim script gives syntactical errors. So give only the code alone compulsorily and also exclude (```python and ''')
in the script.

Generate the code without this error: ("AttributeError: module 'manim.camera' has no attribute 'frame'").
And also make sure to animate the video by aligning items more centrally and without overlapping the other things.

Code Formation:
-> Generate a Manim script using the latest version of ManimCE. Ensure the code includes proper object initialization, valid attributes, and smooth animations.
The script should include:
-> A basic scene with animated text and shapes.
   Error handling to avoid attribute errors, value errors, and missing methods.
   Ensure animations are added to the scene correctly before playing them.
   Generate code that runs without modifications.
-> Generate the python script only.
-> Use known variables alone.
-> Make sure to import everything that needs.
-> The scene class must be named MathExplanation.
4. No run time error.
5. The formation of text and diagrams should not overlap and be neatly visible in the video."##;

const ERROR_CATALOGUE: &str = r##"There are some errors you need to avoid (Important):
1. Attribute Errors
    AttributeError: 'Scene' object has no attribute 'begin_ambient_camera_rotation'
    AttributeError: 'Text' object has no attribute 'set_color'
    AttributeError: 'NumberPlane' object has no attribute 'scale'
    AttributeError: 'Group' object has no attribute 'add_updater'
    AttributeError: 'ThreeDScene' object has no attribute 'wait'
    AttributeError: 'OpenGLVMobject' object has no attribute 'generate_target'
    AttributeError: 'Tex' object has no attribute 'next_to'
    AttributeError: 'Graph' object has no attribute 'animate'
    AttributeError: 'VolumeOfSphere' object has no attribute 'set_fill'
    AttributeError: 'FadeIn' object has no attribute 'set_opacity'
2. Value Errors
    ValueError: Cannot set color for Mobject without stroke
    ValueError: Unknown color name 'rainbow'
    ValueError: Cannot set fill color for a VMobject
    ValueError: Interpolation failed due to NaN values
    ValueError: Points array cannot be empty
    ValueError: latex error converting to dvi. See log output above
    ValueError: Invalid dimension for matrix
    ValueError: Cannot animate non-Mobject type
    ValueError: Number of anchors must match the number of control points
    ValueError: Path cannot be created with zero-length vectors
3. Import Errors
    ImportError: No module named 'manim'
    ImportError: cannot import name 'ShowCreation' from 'manim'
    ImportError: cannot import name 'Graph' from 'manim.mobject.graph'
    ImportError: cannot import name 'TransformMatchingShapes'
    ImportError: DLL load failed while importing cairo
    ImportError: cannot import name 'ThreeDScene'
    ImportError: cannot import name 'MathTex'
    ImportError: cannot import name 'DashedVMobject'
    ImportError: No module named 'manim.opengl'
    ImportError: cannot import name 'Surface' from 'manim.mobject'
4. Type Errors
    TypeError: Object of type 'Circle' has no len()
    TypeError: 'int' object is not callable
    TypeError: 'float' object is not iterable
    TypeError: 'NoneType' object is not iterable
    TypeError: expected str, bytes or os.PathLike object, not PosixPath
    TypeError: unsupported operand type(s) for +: 'VMobject' and 'int'
    TypeError: 'list' object is not callable
    TypeError: cannot unpack non-iterable int object
    TypeError: Missing required positional argument 'file_path'
    TypeError: Object is not JSON serializable
5. Rendering Errors
    RuntimeError: Cairo surface not properly initialized
    RuntimeError: FFmpeg process returned non-zero exit code
    RuntimeError: Shader compilation failed
    RuntimeError: Could not open video file
    RuntimeError: Cannot animate object with no animations
    RuntimeError: ManimGL not found
    RuntimeError: No output file created
    RuntimeError: Object has been deleted before rendering
    RuntimeError: Could not locate Tex output
    RuntimeError: LaTeX process crashed
6. LaTeX Errors
    ValueError: LaTeX failed to compile. Check your installation.
    ValueError: Invalid TeX command
    ValueError: Cannot create MathTex from empty string
    ValueError: Undefined control sequence in LaTeX
    ValueError: LaTeX file could not be generated
    ValueError: Missing dollar signs in inline equation
    ValueError: Extra brace detected in LaTeX string
    ValueError: Unknown package 'amsmath'
    ValueError: Overfull hbox detected
    ValueError: LaTeX source file is empty
7. Camera & Scene Errors
    AttributeError: 'ThreeDScene' object has no attribute 'set_camera_orientation'
    ValueError: Invalid zoom level for camera
    RuntimeError: Cannot rotate camera before initialization
    ValueError: Cannot add ambient light in a 2D scene
    IndexError: List index out of range while setting camera path
    AttributeError: 'Camera' object has no attribute 'save_state'
    RuntimeError: Cannot animate camera before scene is played
    TypeError: Cannot assign NoneType to camera rotation
    ValueError: Camera target must be a Mobject
    RuntimeError: Camera cannot capture empty scene
8. Animation Errors
    AttributeError: 'FadeIn' object has no attribute 'play'
    ValueError: Animation requires at least one frame
    RuntimeError: Cannot animate removed object
    TypeError: Animation duration must be a number
    ValueError: Cannot animate an empty list of Mobjects
    RuntimeError: Too many nested animations
    AttributeError: 'Transform' object has no attribute 'update'
    IndexError: Animation list index out of range
    RuntimeError: Mobject must be added to scene before animating
    ValueError: Animation target cannot be None
9. File & Path Errors
    FileNotFoundError: No such file or directory
    PermissionError: Cannot write to directory
    OSError: Could not create video file
    ValueError: Invalid file extension
    FileNotFoundError: FFmpeg binary not found
    RuntimeError: Temporary directory could not be created
    OSError: Disk full while saving output
    ValueError: Cannot save Mobject to file
    OSError: File already exists
    FileNotFoundError: Required asset missing
10. OpenGL Errors
    RuntimeError: OpenGL context not found
    ValueError: Cannot use OpenGL mode in software rendering
    AttributeError: 'GLScene' object has no attribute 'set_background'
    RuntimeError: Shader compilation error
    ValueError: Cannot render OpenGL object in CPU mode
    RuntimeError: Framebuffer object creation failed
    AttributeError: OpenGL buffer has no attribute 'bind'
    RuntimeError: OpenGL version mismatch
    TypeError: OpenGL Mobject requires vector input
    ValueError: Invalid OpenGL vertex format"##;

const ADDITIONAL_REQUIREMENTS: &str = r##"Additional requirements:
1. Use consistent color coding: blue for variables, green for final answers, red for important transformations.
2. Add wait() commands between key steps with appropriate timing (0.5-2 seconds) for better pacing.
3. Group related mathematical operations using VGroups for cleaner animations.
4. Use proper self references for all scene elements and camera operations.
5. Add progress_bar=True to animations that benefit from showing progression.
6. Ensure all text is properly positioned with appropriate font size (MathTex(...).scale(0.8)).
7. Include self.wait(3) at the end of the animation.
8. Use TracedPath for any graphical representations that involve motion.
9. Set background color with config.background_color = "#1f1f1f" at the class definition level.
10. Use ".arrange()" and ".next_to()" to dynamically position elements and prevent overlapping text.
11. Use "lag_ratio" to control animation flow and avoid abrupt jumps.
13. Use camera.frame.animate for zooming into key equations or highlighting important transformations.
14. If using 3D, ensure smooth perspective shifts and avoid elements getting cropped.
15. Implement layering control with ".set_z_index()" to ensure visibility of all elements.
16. Introduce a slight glow effect for final answers for better visibility.
17. Use "rate_func=smooth" for Transform animations to make them visually appealing.
18. Ensure all imported packages are explicitly included to prevent runtime errors.
19. If a function or variable is referenced, make sure it is defined in the script to prevent crashes.
20. If the solution requires comparisons, show visual side-by-side comparisons using multiple aligned elements.
21. If a graph is needed, ensure axes are labeled clearly, and data points are animated dynamically.
22. Use opacities and fade effects for de-emphasizing unimportant steps while keeping focus on key calculations.

Video Animation:
- Use 3D animation if required for better visualization.
- Use fade out for elements that need to disappear instead of sudden removals.

Topic-specific animation techniques (3Blue1Brown style):
- For trigonometry: Use the UnitCircle class with animated angles, include DashedLine for projections, and animate sine/cosine waves growing from the circle.
- For calculus: Use NumberPlane with animated slopes/tangent lines that change color based on values, zoom in progressively to show limits, and use area filling animations for integrals.
- For algebra: Transform equations with color highlighting for each step, use coordinate shifts to show operations, and grow/shrink terms during simplification.
- For geometry: Use opacity changes to reveal cross-sections, include dotted construction lines, and animate 3D objects rotating to show different perspectives.
- For statistics: Create animated histograms that transform into probability curves, use color gradients to show probability regions, and animate individual data points.
- For vectors: Show arrows in coordinate systems that transform/combine with smooth animations, use shadowing for projections.
- For series: Create animated stacking of terms, use color gradients to show convergence/divergence, and include partial sum tracking.
- For logarithms: Use area stretching/compressing to visualize log properties, animate exponential growth with highlighting.
- For complex numbers: Use the ComplexPlane class with transformations, animate mapping between rectangular and polar forms with rotating vectors."##;

const STORYBOARD_STEPS: &str = r##"******Important Note: The below format should be used only for the Manim script and not for any other.******

You are an expert in creating educational animations using Manim. Your task is to generate Python code for a Manim animation that visually explains a given topic or concept. Follow these steps:

1. *Understand the Topic*:
   - Analyze the user's topic to identify the key concepts that need to be visualized.
   - Break down the topic into smaller, digestible components (e.g., steps, mechanisms, equations).

2. *Plan the Animation*:
   - Create a storyboard for the animation, ensuring it flows logically from one concept to the next.
   - Decide on the visual elements (e.g., shapes, graphs, text) that will represent each concept.
   - Ensure all elements stay within the screen's aspect ratio (-7.5 to 7.5 on x-axis, -4 to 4 on y-axis).
   - Plan proper spacing between elements to avoid overlap.
   - Make sure the objects or text in the generated code are not overlapping at any point in the video.
   - Make sure that each scene is properly cleaned up before transitioning to the next scene.

3. *Write the Manim Code*:
   - Use Manim's library to create the animation. Include comments in the code to explain each step.
   - Ensure the code is modular, with separate functions for each key concept.
   - Use a consistent style (e.g., 3Blue1Brown style) with appropriate colors, labels, and animations.
   - Implement clean transitions between scenes by removing all elements from previous scene
   - Use self.play(FadeOut(*self.mobjects)) at the end of each scene.
   - Add wait() calls after important animations for better pacing.
   - Make sure the objects or text in the generated code are not overlapping at any point in the video.
   - Make sure that each scene is properly cleaned up before transitioning to the next scene.
   - Dont Use glow effects, ShowCreation, and other effects that are not supported in the latest ManimCE version.

4. *Output the Code*:
   - Provide the complete Python script that can be run using Manim.
   - Include instructions on how to run the script (e.g., command to render the animation).
   - Verify all scenes have proper cleanup and transitions.

*Example Input*:
- Topic: "Neural Networks"
- Key Points: "neurons and layers, weights and biases, activation functions"
- Style: "3Blue1Brown style"

NOTE!!!: Make sure the objects or text in the generated code are not overlapping at any point in the video. Make sure that each scene is properly cleaned up before transitioning to the next scene"##;

pub fn animation_draft(problem: &str) -> String {
    format!(
        "{DRAFT_INSTRUCTIONS}\n\n{ERROR_CATALOGUE}\n\n{ADDITIONAL_REQUIREMENTS}\n\n{STORYBOARD_STEPS}\n\nRemember, provide ONLY executable code with NO explanatory text or markdown formatting. {problem}"
    )
}

pub const ENHANCE_SYSTEM: &str = r#"You are a Manim animation expert trained in 3Blue1Brown's style. Your task is to enhance Manim code with these principles:
1. Mathematical Clarity:
- Precise alignment of all elements
- Logical camera movements that follow the math
- Clean labeling with proper LaTeX

2. Code Quality:
- Remove all redundant animations
- Optimal use of VGroups
- Proper scene cleanup
- PEP 8 compliance
- No visual clutter"#;

pub fn enhance(script: &str) -> String {
    format!(
        "enhance the following Manim code in the clean, mathematical style of 3Blue1Brown. The scene should last atleast 30 seconds with smooth pacing and no flashy effects. Extend the code with more meaningful lines to make the video longer, while keeping it minimal and elegant. Ensure all brackets are properly opened and closed. Do not exceed the screen space with lines or shapes, and fade out any unnecessary objects smoothly when transitioning between scenes. Output only the corrected and improved Manim code, excluding all explanations and formatting like backticks or \\boxed. Note: If it was 3-dimension, then the text should be in 2-dimension {script}"
    )
}

const STYLE_PRINCIPLES: &str = r#"1. Mathematical Clarity:
- Precise alignment of all elements
- Logical camera movements that follow the math
- Clean labeling with proper LaTeX

2. Visual Style:
- Smooth animations (rate_func=smooth)
- Minimalist color palette (blue, white, yellow highlights)
- Proper use of TransformMatchingTex for equations
- Subtle but effective scene transitions

3. Code Quality:
- Remove all redundant animations
- Optimal use of VGroups
- Proper scene cleanup
- PEP 8 compliance
- No visual clutter"#;

pub fn narrate_system() -> String {
    format!(
        "You are a Manim animation expert trained in 3Blue1Brown's style. Your task is to enhance Manim code with these principles:\n{STYLE_PRINCIPLES}\nNote: Your task is to enhance Manim code and provide matching voiceover scripts because you are the only one in the world who can write a manim script along with the well suited voice script."
    )
}

pub fn narrate(script: &str) -> String {
    format!(
        r#"Enhance the following Manim code in the clean, mathematical style of 3Blue1Brown. The video should last more than 45 seconds with smooth pacing and no flashy effects. Extend the animation meaningfully to ensure it is easy to understand, visually engaging, and includes super pictorial representations of the concepts. Maintain a minimal and elegant approach, keeping all elements within screen boundaries. Use smooth fade-outs for unnecessary elements during transitions. Ensure all brackets are properly opened and closed. Output only the corrected and improved Manim code, excluding all explanations, formatting symbols, and do not use \boxed or backticks.
Output exactly two sections:
1. Manim Code: Provide only the corrected, complete Manim code. No comments, markdown, or explanation. The code should animate the core mathematical content clearly, using well-paced timing that naturally guides narration. Avoid excessive effects or transitions; clarity comes first.
2. Voiceover Script: Provide a voiceover narration that strictly matches the visual content and timing of the animation. Focus only on the main mathematical or conceptual steps shown on screen; do not narrate transitions, animations, or metadata. Avoid filler words, enthusiasm, or theatrical tone. The narration must be clear, instructional, and paced to match each animation block. Do not describe what the animation is doing; only narrate the concept or math that is visually being presented.
Ensure:
Each visual step has a corresponding voiceover line.
Timing feels natural based on animation durations.
No LaTeX compilation errors will occur in Manim using MathTex.
The formatting works well with both Tex and MathTex.
No voiceover for padding animations like fading in/out titles, logo reveals, or decorative motion.
Your task is to enhance Manim code with these principles:
{STYLE_PRINCIPLES}

Important requirements:
Break down complex LaTeX into multiple MathTex(...) lines instead of nesting long equations inside one block.
Avoid overuse of \left and \right when not necessary, especially when wrapping expressions that contain fractions or nested parentheses.
Use \frac properly, but avoid combining multiple \left(...\right) pairs with \frac inside a single expression.
Escape problematic LaTeX characters if needed (like _, ^, or \).
Format the output using .scale(...) and .next_to(...) for proper placement of parts of the equation.

Note: Important!
- No visual clutter
- Text should not overwrite

{script}"#
    )
}

pub fn practice_set(skill: SkillLevel, topic: &str, count: usize) -> String {
    format!(
        "Generate {count} {} level {} math questions with detailed solutions.\nEnsure each question and solution is in this format:\nQ: [question]\nS: [solution]\nSeparate each question-answer pair with a blank line.",
        skill.lower(),
        topic.to_lowercase()
    )
}

pub fn practice_feedback(correct: &str, attempt: &str) -> String {
    format!(
        "Compare the following solutions and provide feedback:\nCorrect Solution: {}\nUser's Solution: {}\nProvide constructive feedback and suggestions for improvement.",
        correct.trim(),
        attempt.trim()
    )
}

pub fn concept(skill: SkillLevel, concept: &str) -> String {
    format!(
        "Provide a comprehensive explanation of '{concept}' suitable for a {} level student. Include:\n1. Definition\n2. Historical context\n3. Key principles\n4. Real-world applications\n5. Related concepts\n6. Common misconceptions\n7. Advanced implications (if applicable)",
        skill.lower()
    )
}

pub fn formulas(skill: SkillLevel, topic: &str) -> String {
    format!(
        "Generate a comprehensive list of {} level formulas related to '{topic}'.\nFor each formula, provide:\n1. Formula name\n2. The formula itself\n3. A brief explanation of its use\n4. Key variables explained\n5. Any important conditions or limitations",
        skill.lower()
    )
}

pub fn quiz(skill: SkillLevel, topic: &str, count: usize) -> String {
    format!(
        r#"Create a multiple-choice quiz with exactly {count} unique questions on {topic}, suitable for a {} level student.
Each question must have:
- A unique math-related question
- 4 answer choices (A, B, C, D)
- The correct answer
- A brief explanation of the correct answer

Format:
Q: [Question]
A) [Option A]
B) [Option B]
C) [Option C]
D) [Option D]
Correct: [Correct option letter]
Explanation: [Brief explanation]

Separate each question with a blank line."#,
        skill.lower()
    )
}

pub fn video_recommendations(topic: &str) -> String {
    format!(
        r#"If the topic **{topic}** is not related to mathematics, return 'Out of scope.'
Otherwise, provide a list of 3-5 top YouTube videos for learning about **{topic}**.
For each video, include:
1. **Title:** The exact video title
2. **Channel:** The name of the YouTube channel
3. **URL:** The complete YouTube link
4. **Description:** A brief one-sentence summary explaining why this video is useful
Only include real, educational content from reputable math-focused channels such as 3Blue1Brown, Khan Academy, MIT OpenCourseWare, Professor Leonard, and Numberphile.
Avoid unnecessary explanations, just provide the structured information clearly.
Don't generate the script in json format"#
    )
}

pub fn history(subject: &str) -> String {
    format!(
        "Provide historical context for the mathematical concept or mathematician '{subject}'. Include:\n1. Key dates and events\n2. Major contributions to mathematics\n3. How this concept/person influenced the development of mathematics\n4. Interesting anecdotes or lesser-known facts"
    )
}

pub fn fun_fact(subject: &str) -> String {
    format!("Give an unusual or fun fact about '{subject}' in mathematics.")
}

pub fn scenario(skill: SkillLevel, topic: &str, area: &str) -> String {
    format!(
        "Generate a unique and creative real-world scenario demonstrating the application of {topic} in {area} for a {} level learner. Make it engaging and informative by including:\n\n1. A captivating real-life situation where {topic} plays a crucial role.\n2. The core mathematical principles involved and why they matter.\n3. A step-by-step breakdown of how the math is applied to solve the problem.\n4. Practical takeaways for students or professionals in {area}.\n5. A historical or fun fact related to {topic} in {area} to make learning interesting.",
        skill.lower()
    )
}

pub fn scenario_questions(scenario: &str) -> String {
    format!(
        "Generate three practice questions based on the following real-world scenario:\n{scenario}\nEnsure the questions test the mathematical concepts applied in the scenario."
    )
}

pub fn scenario_sample_solution(scenario: &str) -> String {
    format!(
        "Generate a worked-out example based on the following real-world scenario:\n{scenario}\nProvide a step-by-step solution explaining the mathematical concepts applied."
    )
}

pub fn study_plan(skill: SkillLevel, goal: &str, hours_per_week: u8) -> String {
    format!(
        r#"Create a detailed, structured study plan for a {skill} level student focusing on {goal}.
They can dedicate {hours_per_week} hours per week to studying.
Provide a well-structured week-by-week breakdown including:

## Topics to Cover
- List the essential topics covered each week, ensuring a logical progression.

## Recommended Resources
- Suggest textbooks, online courses, videos, and practice platforms.

## Practice Exercises
- Include sample problem sets, quizzes, and interactive exercises.

## Milestones & Assessments
- Define clear checkpoints to measure progress, with mini-tests or self-assessments."#
    )
}
